//! Ordered best-position search.
//!
//! A position is found by running a fixed sequence of passes and taking the
//! first hit. Floor positions are preferred, then edge probes, then (by
//! stackability) stacking or gap filling. Changing the pass order changes
//! every plan the engine produces.

use crate::geometry::Footprint;
use crate::space::{LoadSpace, PlacedBox};
use u_loadplan_core::package::PackageGroup;
use u_loadplan_core::Placement;

/// Offsets tried around existing columns when seeding new ones.
const SEED_OFFSETS: [f64; 4] = [-2.0, -1.0, 1.0, 2.0];

/// One stage of the position search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPass {
    /// Floor grid at 1.0 then 0.5 ft.
    FloorScan,
    /// Far corner, right edge and top edge of the floor.
    EdgeProbe,
    /// On top of an existing column of stackable boxes.
    StackColumn,
    /// On top of any stackable box, widest first.
    StackOnTop,
    /// Beside a stackable box at its level.
    StackBeside,
    /// Non-stackable package on top of a stackable box.
    RestOnStackable,
    /// Non-stackable package in a gap next to any box.
    GapBeside,
    /// Non-stackable package on a free floor cell.
    FloorCell,
    /// Floor positions around existing columns.
    ColumnSeed,
}

impl SearchPass {
    /// Every pass in search order.
    pub const ORDER: [SearchPass; 9] = [
        SearchPass::FloorScan,
        SearchPass::EdgeProbe,
        SearchPass::StackColumn,
        SearchPass::StackOnTop,
        SearchPass::StackBeside,
        SearchPass::RestOnStackable,
        SearchPass::GapBeside,
        SearchPass::FloorCell,
        SearchPass::ColumnSeed,
    ];

    /// Whether the pass runs for packages with this stackability.
    pub fn applies_to(self, stackable: bool) -> bool {
        match self {
            SearchPass::FloorScan | SearchPass::EdgeProbe => true,
            SearchPass::StackColumn
            | SearchPass::StackOnTop
            | SearchPass::StackBeside
            | SearchPass::ColumnSeed => stackable,
            SearchPass::RestOnStackable | SearchPass::GapBeside | SearchPass::FloorCell => {
                !stackable
            }
        }
    }

    /// Runs this pass alone.
    pub fn search(self, space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
        match self {
            SearchPass::FloorScan => floor_scan(space, group),
            SearchPass::EdgeProbe => edge_probe(space, group),
            SearchPass::StackColumn => stack_column(space, group),
            SearchPass::StackOnTop => stack_on_top(space, group),
            SearchPass::StackBeside => stack_beside(space, group),
            SearchPass::RestOnStackable => rest_on_stackable(space, group),
            SearchPass::GapBeside => gap_beside(space, group),
            SearchPass::FloorCell => floor_cell(space, group),
            SearchPass::ColumnSeed => column_seed(space, group),
        }
    }
}

/// Runs the applicable passes in order and returns the first hit.
pub fn find_position(space: &LoadSpace, group: &PackageGroup) -> Option<(SearchPass, Placement)> {
    SearchPass::ORDER
        .into_iter()
        .filter(|pass| pass.applies_to(group.is_stackable()))
        .find_map(|pass| pass.search(space, group).map(|p| (pass, p)))
}

/// `0, step, 2·step, …` up to and including `limit`.
fn steps(limit: f64, step: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| f64::from(i) * step)
        .take_while(move |v| *v <= limit)
}

fn try_at(space: &LoadSpace, fp: &Footprint, x: f64, y: f64, z: f64) -> Option<Placement> {
    let p = fp.at(x, y, z);
    space.can_place_at(&p).then_some(p)
}

fn floor_scan(space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
    let c = space.container();
    for step in [1.0, 0.5] {
        for fp in Footprint::all(group) {
            for x in steps(c.length() - fp.length, step) {
                for y in steps(c.width() - fp.width, step) {
                    if let Some(p) = try_at(space, &fp, x, y, 0.0) {
                        return Some(p);
                    }
                }
            }
        }
    }
    None
}

fn edge_probe(space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
    let c = space.container();
    for fp in Footprint::all(group) {
        let max_x = c.length() - fp.length;
        let max_y = c.width() - fp.width;
        if max_x < 0.0 || max_y < 0.0 {
            continue;
        }

        let hit = try_at(space, &fp, max_x, max_y, 0.0)
            .or_else(|| steps(max_y, 0.5).find_map(|y| try_at(space, &fp, max_x, y, 0.0)))
            .or_else(|| steps(max_x, 0.5).find_map(|x| try_at(space, &fp, x, max_y, 0.0)));
        if hit.is_some() {
            return hit;
        }
    }
    None
}

/// Stackable boxes sharing an exact floor position.
struct Column<'a> {
    x: f64,
    y: f64,
    boxes: Vec<&'a PlacedBox>,
}

impl<'a> Column<'a> {
    /// Box with the highest top face; the first one on ties.
    fn top_box(&self) -> Option<&'a PlacedBox> {
        self.boxes.iter().copied().fold(None, |best, b| match best {
            Some(t) if b.placement.top() <= t.placement.top() => Some(t),
            _ => Some(b),
        })
    }

    fn height(&self) -> f64 {
        self.top_box().map_or(0.0, |b| b.placement.top())
    }
}

fn columns(space: &LoadSpace) -> Vec<Column<'_>> {
    let mut columns: Vec<Column<'_>> = Vec::new();
    for b in space.boxes().iter().filter(|b| b.stackable) {
        let (x, y) = (b.placement.x(), b.placement.y());
        match columns.iter_mut().find(|c| c.x == x && c.y == y) {
            Some(column) => column.boxes.push(b),
            None => columns.push(Column {
                x,
                y,
                boxes: vec![b],
            }),
        }
    }
    columns.sort_by(|a, b| a.height().total_cmp(&b.height()));
    columns
}

fn stack_column(space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
    let max_layers = (space.container().height() / group.height()).floor();
    for column in columns(space) {
        if column.boxes.len() as f64 >= max_layers {
            continue;
        }
        let Some(top) = column.top_box() else {
            continue;
        };
        for fp in Footprint::all(group) {
            if !fp.rests_on(&top.placement) {
                continue;
            }
            if let Some(p) = try_at(space, &fp, column.x, column.y, top.placement.top()) {
                return Some(p);
            }
        }
    }
    None
}

/// On top of `base`, in the first orientation that rests on it.
fn on_top_of(space: &LoadSpace, group: &PackageGroup, base: &PlacedBox) -> Option<Placement> {
    let top = base.placement.top();
    if top + group.height() > space.container().height() {
        return None;
    }
    Footprint::all(group)
        .iter()
        .filter(|fp| fp.rests_on(&base.placement))
        .find_map(|fp| try_at(space, fp, base.placement.x(), base.placement.y(), top))
}

fn stack_on_top(space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
    let mut bases: Vec<&PlacedBox> = space.boxes().iter().filter(|b| b.stackable).collect();
    bases.sort_by(|a, b| {
        let area_a = a.placement.length() * a.placement.width();
        let area_b = b.placement.length() * b.placement.width();
        area_b.total_cmp(&area_a)
    });
    bases.into_iter().find_map(|b| on_top_of(space, group, b))
}

fn stack_beside(space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
    let c = space.container();
    let boxes = space.boxes();

    for (i, base) in boxes.iter().enumerate().filter(|(_, b)| b.stackable) {
        let bp = &base.placement;
        for fp in Footprint::all(group) {
            let right_x = bp.x() + bp.length();
            if right_x + fp.length <= c.length() {
                let obstructed = boxes.iter().enumerate().any(|(j, other)| {
                    let op = &other.placement;
                    j != i
                        && op.x() >= right_x
                        && op.x() < right_x + fp.length
                        && op.y() >= bp.y()
                        && op.y() < bp.y() + fp.width
                });
                if !obstructed {
                    if let Some(p) = try_at(space, &fp, right_x, bp.y(), bp.z()) {
                        return Some(p);
                    }
                }
            }

            let front_y = bp.y() + bp.width();
            if front_y + fp.width <= c.width() {
                if let Some(p) = try_at(space, &fp, bp.x(), front_y, bp.z()) {
                    return Some(p);
                }
            }
        }
    }
    None
}

fn rest_on_stackable(space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
    space
        .boxes()
        .iter()
        .filter(|b| b.stackable)
        .find_map(|b| on_top_of(space, group, b))
}

fn gap_beside(space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
    let c = space.container();
    let mut neighbours: Vec<&Placement> = space.boxes().iter().map(|b| &b.placement).collect();
    neighbours.sort_by(|a, b| a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y())));

    for bp in neighbours {
        for fp in Footprint::all(group) {
            let right_x = bp.x() + bp.length();
            if right_x + fp.length <= c.length() {
                if let Some(p) = try_at(space, &fp, right_x, bp.y(), bp.z()) {
                    return Some(p);
                }
            }

            let below_y = bp.y() + bp.width();
            if below_y + fp.width <= c.width() {
                if let Some(p) = try_at(space, &fp, bp.x(), below_y, bp.z()) {
                    return Some(p);
                }
            }
        }
    }
    None
}

fn floor_cell(space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
    let c = space.container();
    for fp in Footprint::all(group) {
        let nx = (c.length() / fp.length).floor() as u32;
        let ny = (c.width() / fp.width).floor() as u32;
        for i in 0..=nx {
            for j in 0..=ny {
                let x = f64::from(i) * fp.length;
                let y = f64::from(j) * fp.width;
                if let Some(p) = try_at(space, &fp, x, y, 0.0) {
                    return Some(p);
                }
            }
        }

        for x in steps(c.length() - fp.length, 0.5) {
            for y in steps(c.width() - fp.width, 0.5) {
                if x % fp.length == 0.0 && y % fp.width == 0.0 {
                    continue;
                }
                if let Some(p) = try_at(space, &fp, x, y, 0.0) {
                    return Some(p);
                }
            }
        }
    }
    None
}

fn column_seed(space: &LoadSpace, group: &PackageGroup) -> Option<Placement> {
    let c = space.container();
    let mut seeds: Vec<(f64, f64)> = Vec::new();
    for b in space.boxes() {
        let seed = (b.placement.x().floor(), b.placement.y().floor());
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }

    for (cx, cy) in seeds {
        for dx in SEED_OFFSETS {
            for dy in SEED_OFFSETS {
                let (x, y) = (cx + dx, cy + dy);
                if x < 0.0 || y < 0.0 {
                    continue;
                }
                for fp in Footprint::all(group) {
                    if x + fp.length <= c.length() && y + fp.width <= c.width() {
                        if let Some(p) = try_at(space, &fp, x, y, 0.0) {
                            return Some(p);
                        }
                    }
                }
            }
        }
    }
    None
}
