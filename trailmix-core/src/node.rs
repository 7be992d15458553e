//! Road-network nodes and the category labels that make some of them POIs.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use geo::{Coord, Distance, Haversine, Point};

/// Stable identifier of a [`Node`].
pub type NodeId = u64;

/// A point-of-interest class such as `"museum"` or `"viewpoint"`.
///
/// Categories are interned behind an `Arc<str>` so copies along a route are
/// cheap.
///
/// # Examples
/// ```
/// use trailmix_core::Category;
///
/// let category = Category::new("museum");
/// assert_eq!(category.as_str(), "museum");
/// assert_eq!(category, Category::from("museum"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub struct Category(Arc<str>);

impl Category {
    /// Construct a category from any string-like label.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Return the label as a `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self(Arc::from(label))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_owned()
    }
}

/// A vertex of the road network.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Equality
/// and hashing consider the identifier only.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use trailmix_core::Node;
///
/// let node = Node::new(7, Coord { x: 9.05, y: 48.52 }).with_category("museum");
/// assert_eq!(node.id, 7);
/// assert!(node.is_poi());
/// assert_eq!(node, Node::new(7, Coord { x: 0.0, y: 0.0 }));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// POI class; `None` for plain road nodes.
    pub category: Option<Category>,
    /// Road classification reported by the ingestion step. Informational only.
    pub road_class: Option<String>,
}

impl Node {
    /// Construct a node that is not a point of interest.
    #[must_use]
    pub const fn new(id: NodeId, location: Coord<f64>) -> Self {
        Self {
            id,
            location,
            category: None,
            road_class: None,
        }
    }

    /// Attach a category, turning the node into a point of interest.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a road classification.
    #[must_use]
    pub fn with_road_class(mut self, road_class: impl Into<String>) -> Self {
        self.road_class = Some(road_class.into());
        self
    }

    /// Whether the node carries a category.
    #[must_use]
    pub const fn is_poi(&self) -> bool {
        self.category.is_some()
    }

    /// Great-circle distance to `other` in metres.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use trailmix_core::Node;
    ///
    /// let a = Node::new(1, Coord { x: 0.0, y: 0.0 });
    /// let b = Node::new(2, Coord { x: 0.0, y: 1.0 });
    /// let metres = a.distance_to(&b);
    /// assert!((metres - 111_195.0).abs() < 100.0);
    /// ```
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        Haversine.distance(Point::from(self.location), Point::from(other.location))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(f, "node {} ({category})", self.id),
            None => write!(f, "node {}", self.id),
        }
    }
}
