use timeline_rs::core::spatial_grid::{MAX_GRID_ROWS, MAX_SPAN_CELLS, max_row_for_height};
use timeline_rs::core::{CellSize, ElementSize, Footprint, SpatialGrid};

#[test]
fn disjoint_columns_share_the_top_row() {
    let mut grid = SpatialGrid::new();
    assert!(grid.is_empty());
    assert_eq!(grid.place(Footprint::new(0, 2, 2), 19), 0);
    assert_eq!(grid.place(Footprint::new(10, 2, 2), 19), 0);
    assert!(!grid.is_empty());
}

#[test]
fn overlapping_labels_stack_below_each_other() {
    let mut grid = SpatialGrid::new();
    let cell = CellSize::default();
    let size = ElementSize::new(40.0, 40.0);

    let first = Footprint::from_pixels(500.0, size, cell);
    let second = Footprint::from_pixels(510.0, size, cell);
    assert_eq!(first, Footprint::new(33, 2, 2));
    assert_eq!(second, Footprint::new(34, 2, 2));

    assert_eq!(grid.place(first, 19), 0);
    assert_eq!(grid.place(second, 19), 2);
    assert_eq!(grid.query(34, 0, 1, 4), 1);
}

#[test]
fn query_reports_peak_occupancy_across_the_footprint() {
    let mut grid = SpatialGrid::new();
    grid.occupy(3, 0, 1, 2);
    grid.occupy(4, 1, 1, 1);
    grid.occupy(4, 1, 1, 1);

    assert_eq!(grid.query(3, 0, 2, 1), 1);
    assert_eq!(grid.query(3, 0, 2, 2), 2);
    assert_eq!(grid.query(5, 0, 3, 3), 0);
    assert_eq!(grid.query(3, 7, 2, 2), 0);
}

#[test]
fn too_short_viewport_places_everything_on_row_zero() {
    let cell = CellSize::default();
    assert_eq!(max_row_for_height(20.0, cell), 0);

    let mut grid = SpatialGrid::new();
    assert_eq!(grid.place(Footprint::new(0, 1, 1), 0), 0);
    assert_eq!(grid.place(Footprint::new(0, 1, 1), 0), 0);
    assert_eq!(grid.query(0, 0, 1, 1), 2);
}

#[test]
fn clear_releases_all_cells() {
    let mut grid = SpatialGrid::new();
    grid.place(Footprint::new(0, 3, 3), 19);
    grid.clear();
    assert!(grid.is_empty());
    assert_eq!(grid.place(Footprint::new(1, 1, 1), 19), 0);
}

#[test]
fn narrow_or_short_elements_take_at_least_one_cell() {
    let footprint =
        Footprint::from_pixels(-20.0, ElementSize::new(0.0, 5.0), CellSize::default());
    assert_eq!(footprint, Footprint::new(-2, 1, 1));
}

#[test]
fn huge_rows_and_spans_saturate_instead_of_overflowing() {
    let mut grid = SpatialGrid::new();
    grid.occupy(0, u32::MAX - 1, 1, u32::MAX);
    assert_eq!(grid.query(0, u32::MAX - 1, 1, u32::MAX), 0);
    assert!(grid.is_empty());

    grid.occupy(0, MAX_GRID_ROWS - 2, 1, 8);
    assert_eq!(grid.query(0, MAX_GRID_ROWS - 2, 1, u32::MAX), 1);
    assert_eq!(grid.find_lowest_free_row(0, 1, u32::MAX, 19), 0);
}

#[test]
fn very_tall_elements_are_capped_in_cells() {
    let footprint = Footprint::from_pixels(
        0.0,
        ElementSize::new(f64::MAX, f64::MAX),
        CellSize::default(),
    );
    assert_eq!(footprint.col_span, MAX_SPAN_CELLS);
    assert_eq!(footprint.row_span, MAX_SPAN_CELLS);

    let tall = Footprint::from_pixels(0.0, ElementSize::new(20.0, 1e12), CellSize::default());
    let mut grid = SpatialGrid::new();
    assert_eq!(grid.place(tall, 19), 0);
    assert_eq!(grid.query(0, MAX_GRID_ROWS - 1, 1, 1), 1);
}
