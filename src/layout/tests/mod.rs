use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest_derive::Arbitrary;

use super::*;
use crate::backend::{BackendEvent, HeadlessBackend};
use crate::layout::snapshot::GridSnapshot;


#[derive(Debug)]
pub struct TestElement {
    pub id: usize,
    /// Table held by this element, if it wraps one.
    pub nested: Option<Box<TestLayout>>,
}

impl TestElement {
    pub fn new(id: usize) -> Self {
        Self { id, nested: None }
    }
}

impl LayoutElement for TestElement {
    type Id = usize;

    fn id(&self) -> &usize {
        &self.id
    }
}

// Ids of wrapping elements start high so they never clash with the ids tests pick.
static NEXT_CONTAINER_ID: AtomicUsize = AtomicUsize::new(1000);

impl ContainerElement<HeadlessBackend<usize>> for TestElement {
    fn from_layout(layout: TestLayout) -> Self {
        Self {
            id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
            nested: Some(Box::new(layout)),
        }
    }
}

pub type TestLayout = GridLayout<TestElement, HeadlessBackend<usize>>;

pub fn el(id: usize) -> TestElement {
    TestElement::new(id)
}

pub fn item(id: usize) -> Option<TableItem<TestElement>> {
    Some(TableItem::new(el(id)))
}

#[derive(Debug, Clone, Arbitrary)]
pub enum Op {
    Add {
        #[proptest(strategy = "1..=6usize")]
        id: usize,
        #[proptest(strategy = "0..4usize")]
        x: usize,
        #[proptest(strategy = "0..4usize")]
        y: usize,
    },
    AddScaled {
        #[proptest(strategy = "1..=6usize")]
        id: usize,
        #[proptest(strategy = "0..4usize")]
        x: usize,
        #[proptest(strategy = "0..4usize")]
        y: usize,
        column_scale: bool,
        row_scale: bool,
    },
    Move {
        #[proptest(strategy = "1..=6usize")]
        id: usize,
        #[proptest(strategy = "0..4usize")]
        x: usize,
        #[proptest(strategy = "0..4usize")]
        y: usize,
    },
    SetLocation {
        #[proptest(strategy = "1..=6usize")]
        id: usize,
        #[proptest(strategy = "0..4usize")]
        x: usize,
        #[proptest(strategy = "0..4usize")]
        y: usize,
    },
    Remove {
        #[proptest(strategy = "1..=6usize")]
        id: usize,
    },
    ClearCell {
        #[proptest(strategy = "0..4usize")]
        x: usize,
        #[proptest(strategy = "0..4usize")]
        y: usize,
    },
    SetColumnScale {
        #[proptest(strategy = "0..4usize")]
        column: usize,
        scale: bool,
    },
    SetRowScale {
        #[proptest(strategy = "0..4usize")]
        row: usize,
        scale: bool,
    },
    SetColumnScales {
        #[proptest(strategy = "proptest::collection::btree_set(0..4usize, 0..=3)")]
        columns: BTreeSet<usize>,
    },
    SetRowScales {
        #[proptest(strategy = "proptest::collection::btree_set(0..4usize, 0..=3)")]
        rows: BTreeSet<usize>,
    },
    SetColumnScaleHint {
        #[proptest(strategy = "1..=6usize")]
        id: usize,
        scale: bool,
    },
}

impl Op {
    /// Applies the operation, returning the elements it handed back.
    pub fn apply(self, layout: &mut TestLayout) -> Result<Vec<TestElement>, GridError> {
        let detached = match self {
            Op::Add { id, x, y } => layout.add(el(id), (x, y))?,
            Op::AddScaled {
                id,
                x,
                y,
                column_scale,
                row_scale,
            } => layout.add_scaled(el(id), (x, y), column_scale, row_scale)?,
            Op::Move { id, x, y } => layout.move_element(&id, (x, y))?,
            Op::SetLocation { id, x, y } => layout.set_location(&id, (x, y))?,
            Op::Remove { id } => layout.remove(&id),
            Op::ClearCell { x, y } => layout.clear_cell((x, y))?,
            Op::SetColumnScale { column, scale } => {
                layout.set_column_scale(column, scale)?;
                None
            }
            Op::SetRowScale { row, scale } => {
                layout.set_row_scale(row, scale)?;
                None
            }
            Op::SetColumnScales { columns } => {
                layout.set_column_scales(columns)?;
                None
            }
            Op::SetRowScales { rows } => {
                layout.set_row_scales(rows)?;
                None
            }
            Op::SetColumnScaleHint { id, scale } => {
                layout.set_column_scale_hint(&id, scale)?;
                None
            }
        };

        Ok(detached.into_iter().collect())
    }
}

/// Runs operations on a 3×3 table, checking invariants after each one.
///
/// Failed operations must leave the layout and the backend untouched.
pub fn check_ops(ops: impl IntoIterator<Item = Op>) -> TestLayout {
    let mut layout = TestLayout::sized((3, 3), HeadlessBackend::new());
    layout.verify_invariants();

    for op in ops {
        let before = GridSnapshot::capture(&layout);
        let events = layout.backend().events().len();

        match op.clone().apply(&mut layout) {
            Ok(detached) => {
                for element in detached {
                    assert!(!layout.contains(&element.id), "{op:?}: detached element is still placed");
                    assert_eq!(layout.location(&element.id), None);
                }
            }
            Err(_) => {
                assert_eq!(GridSnapshot::capture(&layout), before, "{op:?} failed but changed the layout");
                assert_eq!(layout.backend().events().len(), events, "{op:?} failed but reached the backend");
            }
        }

        layout.verify_invariants();
    }

    layout
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        ..ProptestConfig::default()
    })]

    #[test]
    fn random_operations(ops: Vec<Op>) {
        check_ops(ops);
    }

    #[test]
    fn declared_contents_match_explicit_placement(
        declarations in proptest::collection::vec((0..3usize, 0..3usize, any::<bool>(), any::<bool>()), 0..8),
    ) {
        let mut declared = TestLayout::new(HeadlessBackend::new());
        let mut explicit = TestLayout::sized((3, 3), HeadlessBackend::new());

        for (id, &(x, y, column_hint, row_hint)) in declarations.iter().enumerate() {
            declared.add_content_at(el(id), (x, y)).unwrap();
            declared.set_column_scale_hint(&id, column_hint).unwrap();
            declared.set_row_scale_hint(&id, row_hint).unwrap();

            explicit.add(el(id), (x, y)).unwrap();
            if column_hint {
                explicit.set_column_scale(x, true).unwrap();
            }
            if row_hint {
                explicit.set_row_scale(y, true).unwrap();
            }
        }

        declared.set_cell_size((3, 3)).unwrap();
        declared.end_init(true).unwrap();
        declared.verify_invariants();

        prop_assert_eq!(GridSnapshot::capture(&declared), GridSnapshot::capture(&explicit));
    }
}

#[test]
fn add_out_of_range_fails() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    let err = layout.add(el(1), (2, 0)).unwrap_err();
    assert_eq!(
        err,
        GridError::OutOfRange {
            loc: Location::new(2, 0),
            size: CellSize::new(2, 2),
        }
    );
    assert!(!layout.contains(&1));
    layout.verify_invariants();
}

#[test]
fn add_to_unsized_layout_fails() {
    let mut layout = TestLayout::new(HeadlessBackend::new());
    assert!(matches!(
        layout.add(el(1), (0, 0)),
        Err(GridError::OutOfRange { .. })
    ));
}

#[test]
fn adding_into_occupied_cell_detaches_previous_element() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    assert!(layout.add(el(1), (1, 1)).unwrap().is_none());

    let old = layout.add(el(2), (1, 1)).unwrap().unwrap();
    layout.verify_invariants();

    assert_eq!(old.id, 1);
    assert!(!layout.contains(&1));
    assert_eq!(layout.location(&1), None);
    assert_eq!(layout.element_at(Location::new(1, 1)).unwrap().id, 2);
    assert_eq!(layout.elements().count(), 1);
}

#[test]
fn adding_present_element_fails() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.add(el(1), (0, 0)).unwrap();
    assert_eq!(layout.add(el(1), (1, 1)).unwrap_err(), GridError::AlreadyPresent);
    assert_eq!(layout.position(&1), Some(Location::new(0, 0)));
}

#[test]
fn add_scaled_sets_both_flags() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.set_column_scales([0, 1]).unwrap();

    layout.add_scaled(el(1), (1, 0), false, true).unwrap();
    assert_eq!(layout.column_scales(), BTreeSet::from([0]));
    assert_eq!(layout.row_scales(), BTreeSet::from([0]));
}

#[test]
fn move_displaces_occupant() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.add(el(1), (0, 0)).unwrap();
    layout.add(el(2), (1, 1)).unwrap();

    let old = layout.move_element(&1, (1, 1)).unwrap().unwrap();
    layout.verify_invariants();

    assert_eq!(old.id, 2);
    assert!(layout.element_at(Location::new(0, 0)).is_none());
    assert_eq!(layout.position(&1), Some(Location::new(1, 1)));
    assert_eq!(
        layout.backend().events().last(),
        Some(&BackendEvent::Move {
            element: 1,
            x: 1,
            y: 1
        })
    );
}

#[test]
fn move_to_same_cell_keeps_element() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.add(el(1), (0, 1)).unwrap();
    assert!(layout.move_element(&1, (0, 1)).unwrap().is_none());
    assert_eq!(layout.position(&1), Some(Location::new(0, 1)));
    layout.verify_invariants();
}

#[test]
fn move_of_absent_element_fails_without_changes() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.add(el(1), (0, 0)).unwrap();
    let events = layout.backend().events().len();

    assert_eq!(layout.move_element(&7, (1, 1)).unwrap_err(), GridError::NotFound);
    assert_eq!(layout.backend().events().len(), events);
    assert!(layout.element_at(Location::new(1, 1)).is_none());
}

#[test]
fn move_out_of_range_fails() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.add(el(1), (0, 0)).unwrap();
    assert!(matches!(
        layout.move_element(&1, (0, 2)),
        Err(GridError::OutOfRange { .. })
    ));
    assert_eq!(layout.position(&1), Some(Location::new(0, 0)));
}

#[test]
fn remove_of_absent_element_does_nothing() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.add(el(1), (0, 0)).unwrap();
    let events = layout.backend().events().len();

    assert!(layout.remove(&2).is_none());
    assert_eq!(layout.backend().events().len(), events);
    layout.verify_invariants();
}

#[test]
fn remove_hands_element_back() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.add(el(1), (1, 0)).unwrap();

    let removed = layout.remove(&1).unwrap();
    layout.verify_invariants();

    assert_eq!(removed.id, 1);
    assert!(layout.element_at(Location::new(1, 0)).is_none());
    assert_eq!(layout.location(&1), None);
    assert_eq!(
        layout.backend().events().last(),
        Some(&BackendEvent::Remove { element: 1 })
    );
}

#[test]
fn clear_cell_empties_cell() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.add(el(1), (0, 1)).unwrap();

    let old = layout.clear_cell((0, 1)).unwrap().unwrap();
    layout.verify_invariants();
    assert_eq!(old.id, 1);

    assert!(layout.clear_cell((0, 1)).unwrap().is_none());
    assert_eq!(
        layout.backend().events().last(),
        Some(&BackendEvent::Add {
            element: None,
            x: 0,
            y: 1
        })
    );
}

#[test]
fn set_location_moves_placed_element() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    layout.add(el(1), (0, 0)).unwrap();

    layout.set_location(&1, (1, 0)).unwrap();
    layout.verify_invariants();
    assert_eq!(layout.position(&1), Some(Location::new(1, 0)));
    assert_eq!(layout.location(&1), Some(Location::new(1, 0)));

    assert_eq!(layout.set_location(&9, (1, 0)).unwrap_err(), GridError::NotFound);
}

#[test]
fn scale_hints_need_an_owned_element() {
    let mut layout = TestLayout::sized((2, 2), HeadlessBackend::new());
    assert_eq!(layout.set_column_scale_hint(&1, true), Err(GridError::NotFound));

    layout.add(el(1), (0, 0)).unwrap();
    layout.set_row_scale_hint(&1, true).unwrap();
    assert_eq!(layout.scale_hints(&1), Some(ScaleHints::ROW));

    // Hints of a placed element do not touch the flags.
    assert!(layout.row_scales().is_empty());
}

#[test]
fn size_can_only_be_set_once() {
    let mut layout = TestLayout::new(HeadlessBackend::new());
    layout.set_cell_size((2, 2)).unwrap();
    assert_eq!(
        layout.set_cell_size((3, 3)),
        Err(GridError::SizeAlreadySet(CellSize::new(2, 2)))
    );

    let mut layout = TestLayout::sized((1, 1), HeadlessBackend::new());
    assert!(layout.set_cell_size((1, 1)).is_err());
}

#[test]
fn scale_flags_are_bounds_checked() {
    let mut layout = TestLayout::sized((2, 3), HeadlessBackend::new());
    assert_eq!(
        layout.set_column_scale(2, true),
        Err(GridError::TrackOutOfRange {
            axis: Axis::Column,
            index: 2,
            len: 2
        })
    );
    assert_eq!(layout.row_scale(2), Ok(false));

    let events = layout.backend().events().len();
    assert!(layout.set_row_scales([0, 5]).is_err());
    assert_eq!(layout.backend().events().len(), events);

    let r#unsized = TestLayout::new(HeadlessBackend::new());
    assert!(matches!(
        r#unsized.column_scale(0),
        Err(GridError::TrackOutOfRange { len: 0, .. })
    ));
}

#[test]
fn whole_set_scale_replaces_flags() {
    let mut layout = TestLayout::sized((4, 2), HeadlessBackend::new());
    layout.set_column_scales([0, 3]).unwrap();
    layout.set_column_scales([1]).unwrap();
    assert_eq!(layout.column_scales(), BTreeSet::from([1]));
    assert_eq!(layout.column_scale(0), Ok(false));

    layout.set_row_scales([]).unwrap();
    assert!(layout.row_scales().is_empty());
}

#[test]
fn auto_sized_centers_element() {
    let layout = TestLayout::auto_sized(el(1), None, true, HeadlessBackend::new());
    layout.verify_invariants();

    assert_eq!(layout.cell_size(), CellSize::new(3, 3));
    assert_eq!(layout.position(&1), Some(Location::new(1, 1)));
    assert_eq!(layout.column_scales(), BTreeSet::from([0, 2]));
    assert_eq!(layout.row_scales(), BTreeSet::from([0, 2]));
    assert_eq!(layout.spacing(), Spacing::ZERO);
    assert_eq!(layout.padding(), Padding::ZERO);
}

#[test]
fn auto_sized_keeps_padding_without_scaling() {
    let padding = Padding::new(1, 2, 3, 4);
    let layout = TestLayout::auto_sized(el(1), Some(padding), false, HeadlessBackend::new());

    assert_eq!(layout.padding(), padding);
    assert!(layout.column_scales().is_empty());
    assert!(layout.row_scales().is_empty());
}

#[test]
fn rows_with_gaps() {
    let rows = [
        Some(TableRow::new([item(1), item(2)])),
        Some(TableRow::new([item(3), None])),
        None,
    ];
    let layout = TestLayout::from_rows(rows, HeadlessBackend::new()).unwrap();
    layout.verify_invariants();

    assert_eq!(layout.cell_size(), CellSize::new(2, 3));
    assert_eq!(layout.position(&1), Some(Location::new(0, 0)));
    assert_eq!(layout.position(&2), Some(Location::new(1, 0)));
    assert_eq!(layout.position(&3), Some(Location::new(0, 1)));
    assert_eq!(layout.column_scales(), BTreeSet::from([1]));
    assert_eq!(layout.row_scales(), BTreeSet::from([2]));
}

#[test]
fn row_of_gaps_scales_columns_not_row() {
    let rows = [
        Some(TableRow::new([item(1), item(2)])),
        Some(TableRow::new([None, None])),
    ];
    let layout = TestLayout::from_rows(rows, HeadlessBackend::new()).unwrap();

    assert_eq!(layout.column_scales(), BTreeSet::from([0, 1]));
    assert!(layout.row_scales().is_empty());
}

#[test]
fn options_follow_config() {
    let config = tablegrid_config::Config::parse(
        "test.kdl",
        r#"
        layout {
            spacing horizontal=2 vertical=3
            padding 4 left=1
        }
        "#,
    )
    .unwrap();
    let options = Rc::new(Options::from_config(&config));

    let layout = TestLayout::sized_with_options((1, 1), HeadlessBackend::new(), options.clone());
    assert_eq!(layout.spacing(), Spacing::new(2, 3));
    assert_eq!(layout.padding(), Padding::new(1, 4, 4, 4));
    assert!(Rc::ptr_eq(layout.options(), &options));
}
