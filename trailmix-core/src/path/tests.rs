//! Unit tests for path concatenation and splicing.

use super::*;
use geo::Coord;
use rstest::{fixture, rstest};

fn node(id: NodeId) -> Arc<Node> {
    Arc::new(Node::new(id, Coord { x: 0.0, y: 0.0 }))
}

fn path(steps: &[(NodeId, f64)]) -> Path {
    Path::from_steps(
        steps
            .iter()
            .map(|&(id, cost)| PathStep::new(node(id), cost))
            .collect(),
    )
    .expect("fixture costs are valid")
}

#[fixture]
fn route() -> Path {
    path(&[(1, 0.0), (2, 1.0), (3, 3.0), (4, 6.0)])
}

#[rstest]
fn empty_path_has_no_cost() {
    let empty = Path::empty();
    assert!(empty.is_empty());
    assert_eq!(empty.total_cost(), None);
    assert_eq!(Path::single(node(9)).total_cost(), Some(0.0));
}

#[rstest]
#[case(&[(1, 1.0)], 0)]
#[case(&[(1, 0.0), (2, 2.0), (3, 1.0)], 2)]
#[case(&[(1, 0.0), (2, f64::INFINITY)], 1)]
fn invalid_costs_are_rejected(#[case] steps: &[(NodeId, f64)], #[case] index: usize) {
    let steps = steps
        .iter()
        .map(|&(id, cost)| PathStep::new(node(id), cost))
        .collect();
    let err = Path::from_steps(steps).expect_err("costs break the invariant");
    assert!(matches!(err, PathError::InvalidCost { index: i, .. } if i == index));
}

#[rstest]
fn append_shares_the_junction(mut route: Path) {
    route
        .append(path(&[(4, 0.0), (5, 2.0)]))
        .expect("junction matches");
    assert_eq!(route.node_ids(), vec![1, 2, 3, 4, 5]);
    assert_eq!(route.total_cost(), Some(8.0));
}

#[rstest]
fn append_to_empty_adopts_other(route: Path) {
    let mut empty = Path::empty();
    empty.append(route.clone()).expect("empty receiver accepts");
    assert_eq!(empty, route);
}

#[rstest]
fn append_empty_is_a_no_op(mut route: Path) {
    let before = route.clone();
    route.append(Path::empty()).expect("empty other is accepted");
    assert_eq!(route, before);
}

#[rstest]
fn append_mismatch_leaves_receiver(mut route: Path) {
    let before = route.clone();
    let err = route
        .append(path(&[(7, 0.0), (8, 1.0)]))
        .expect_err("junction differs");
    assert_eq!(
        err,
        PathError::EndpointMismatch {
            expected: 4,
            found: Some(7)
        }
    );
    assert_eq!(route, before);
}

#[rstest]
fn splice_replaces_inner_segment(mut route: Path) {
    route
        .splice(path(&[(2, 0.0), (9, 1.0), (3, 1.5)]), 1, 2)
        .expect("endpoints match");
    assert_eq!(route.node_ids(), vec![1, 2, 9, 3, 4]);
    let costs: Vec<f64> = route.steps().iter().map(|step| step.cost).collect();
    assert_eq!(costs, vec![0.0, 1.0, 2.0, 2.5, 5.5]);
}

#[rstest]
fn splice_at_single_position_inserts_a_loop(mut route: Path) {
    route
        .splice(path(&[(3, 0.0), (9, 1.0), (3, 2.0)]), 2, 2)
        .expect("loop starts and ends on the anchor");
    assert_eq!(route.node_ids(), vec![1, 2, 3, 9, 3, 4]);
    assert_eq!(route.total_cost(), Some(8.0));
}

#[rstest]
fn splice_over_whole_path(mut route: Path) {
    route
        .splice(path(&[(1, 0.0), (4, 2.0)]), 0, 3)
        .expect("whole path replaced");
    assert_eq!(route.node_ids(), vec![1, 4]);
    assert_eq!(route.total_cost(), Some(2.0));
}

#[rstest]
#[case(2, 1)]
#[case(1, 4)]
fn splice_rejects_bad_ranges(mut route: Path, #[case] start: usize, #[case] end: usize) {
    let err = route
        .splice(path(&[(2, 0.0), (3, 1.0)]), start, end)
        .expect_err("range is invalid");
    assert_eq!(err, PathError::InvalidRange { start, end, len: 4 });
}

#[rstest]
#[case(path(&[(5, 0.0), (3, 1.0)]), 2, Some(5))]
#[case(path(&[(2, 0.0), (5, 1.0)]), 3, Some(5))]
#[case(Path::empty(), 2, None)]
fn splice_rejects_mismatched_endpoints(
    mut route: Path,
    #[case] insertion: Path,
    #[case] expected: NodeId,
    #[case] found: Option<NodeId>,
) {
    let before = route.clone();
    let err = route
        .splice(insertion, 1, 2)
        .expect_err("endpoints differ");
    assert_eq!(err, PathError::EndpointMismatch { expected, found });
    assert_eq!(route, before);
}

#[rstest]
fn positions_and_categories() {
    let art = Arc::new(Node::new(2, Coord { x: 0.0, y: 0.0 }).with_category("art"));
    let food = Arc::new(Node::new(3, Coord { x: 0.0, y: 0.0 }).with_category("food"));
    let steps = vec![
        PathStep::new(node(1), 0.0),
        PathStep::new(art.clone(), 1.0),
        PathStep::new(food, 2.0),
        PathStep::new(art, 3.0),
    ];
    let route = Path::from_steps(steps).expect("valid costs");
    assert_eq!(route.position(2), Some(1));
    assert_eq!(route.position_from(2, 2), Some(3));
    assert_eq!(route.position(42), None);
    assert_eq!(route.unique_category_count(), 2);
}

#[rstest]
fn display_elides_long_paths() {
    let steps: Vec<(NodeId, f64)> = (0_u32..20)
        .map(|id| (NodeId::from(id), f64::from(id)))
        .collect();
    let long = path(&steps);
    assert_eq!(
        long.to_string(),
        "Path: 0, 1, [17 nodes], 19, total length: 19.00"
    );
    assert_eq!(
        path(&[(1, 0.0), (2, 1.5)]).to_string(),
        "Path: 1, 2, total length: 1.50"
    );
}
