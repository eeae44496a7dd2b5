//! End-to-end board flows through the public session API.

use kurbo::Point;
use std::time::Instant;
use tierdeck_core::{
    DragSurface, DropSpot, HitTarget, ImageFormat, ImageSource, Orientation, PointerDrag, Preset,
    RowId, Session, TileId, TouchDrag,
};

/// Surface with one 100px band per row in export order.
struct RowBands {
    layout: Vec<(RowId, Vec<TileId>)>,
}

impl RowBands {
    fn of(session: &Session) -> Self {
        let layout = session
            .board
            .rows()
            .map(|(row_id, row)| (row_id, row.tiles.iter().map(|t| t.id()).collect()))
            .collect();
        Self { layout }
    }
}

impl DragSurface for RowBands {
    fn hit_test(&self, point: Point) -> Option<HitTarget> {
        if point.y < 0.0 || point.x < 0.0 {
            return None;
        }
        let (row, tiles) = self.layout.get((point.y / 100.0) as usize)?;
        Some(HitTarget {
            row: *row,
            tile: tiles.get((point.x / 100.0) as usize).copied(),
        })
    }
}

fn encoded(n: u8) -> ImageSource {
    ImageSource::from_bytes(ImageFormat::Png, &[n, n, n])
}

#[test]
fn manifest_tiles_rank_compose_and_clean_up() {
    let now = Instant::now();
    let mut session = Session::new(Preset::default_preset());
    session.load_manifest(Ok("a.png,Alpha\nb.png,Beta\nc.png,Gamma\n".to_string()), now);
    assert_eq!(session.board.len(), 3);

    let pool_ids: Vec<TileId> = session.board.row(RowId::Pool).unwrap().tiles.iter().map(|t| t.id()).collect();

    // Rank the first two tiles into S via the pointer path.
    let s = session.board.tier_by_name("S").unwrap();
    for &id in &pool_ids[..2] {
        let surface = RowBands::of(&session);
        // Tier band 1 (pool is band 0), empty space.
        assert!(PointerDrag::begin(id).drop_at(&mut session.board, &surface, Point::new(900.0, 150.0)));
    }
    assert_eq!(session.board.row(s).unwrap().len(), 2);
    assert_eq!(session.board.row(RowId::Pool).unwrap().len(), 1);

    // Touch-drag the second S tile in front of the first: same engine,
    // insert-before semantics.
    let surface = RowBands::of(&session);
    let mut touch = TouchDrag::begin(pool_ids[1], Point::new(150.0, 150.0));
    touch.move_to(Point::new(40.0, 150.0));
    assert!(touch.finish(&mut session.board, &surface, Point::new(40.0, 150.0)));
    let s_order: Vec<TileId> = session.board.row(s).unwrap().tiles.iter().map(|t| t.id()).collect();
    assert_eq!(s_order, vec![pool_ids[1], pool_ids[0]]);

    // Compose the two ranked tiles.
    session.toggle_selection(pool_ids[0], now);
    session.toggle_selection(pool_ids[1], now);
    let request = session.begin_composition(Orientation::Vertical, now).unwrap();
    assert_eq!(request.joined_label(), "Alpha / Beta");
    let composed = session.finish_composition(&request, Ok(encoded(7)), now).unwrap();

    // New tile at pool head, removable; selection reset.
    let pool = session.board.row(RowId::Pool).unwrap();
    assert_eq!(pool.tiles[0].id(), composed);
    assert!(!pool.tiles[0].initial);
    assert_eq!(session.selection_count(), 0);

    // Context action: composed tile in the pool is removed; a manifest tile
    // in a tier row only travels back to the pool.
    session.context_action(composed);
    assert!(session.board.tile(composed).is_none());
    session.context_action(pool_ids[0]);
    assert_eq!(session.board.row_of(pool_ids[0]), Some(RowId::Pool));

    // Back in the pool it is still protected.
    session.context_action(pool_ids[0]);
    assert!(session.board.tile(pool_ids[0]).is_some());
}

#[test]
fn reorder_session_wrapper_matches_engine_rules() {
    let now = Instant::now();
    let mut session = Session::new(Preset::default_preset());
    session.load_manifest(Ok("a.png,A\nb.png,B\n".to_string()), now);
    let ids: Vec<TileId> = session.board.row(RowId::Pool).unwrap().tiles.iter().map(|t| t.id()).collect();

    // Dropping a tile onto itself appends it to the row tail.
    assert!(session.reorder(ids[0], DropSpot::OnTile(ids[0]), RowId::Pool));
    let order: Vec<TileId> = session.board.row(RowId::Pool).unwrap().tiles.iter().map(|t| t.id()).collect();
    assert_eq!(order, vec![ids[1], ids[0]]);
}
