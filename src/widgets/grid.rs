//! Grid container: children placed on a two-dimensional cell grid.

use std::boxed::Box as StdBox;

use crate::core::child::{ChildId, ChildIds, ChildSlot, HasSlot};
use crate::core::component::{Component, Focusable};
use crate::core::event::{KeyEvent, MouseEvent, PasteEvent};
use crate::core::focus::{position, FocusState};
use crate::core::proxy::Region;
use crate::core::screen::Screen;
use crate::core::sizing::{distribute, offsets, Sizing};

/// Origin and span of a child, in grid columns and rows.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct GridCell {
    pub column: usize,
    pub row: usize,
    pub columns: usize,
    pub rows: usize,
}

impl GridCell {
    pub const fn new(column: usize, row: usize, columns: usize, rows: usize) -> Self {
        Self {
            column,
            row,
            columns,
            rows,
        }
    }
}

struct GridChild {
    slot: ChildSlot,
    cell: GridCell,
}

impl HasSlot for GridChild {
    fn slot(&self) -> &ChildSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ChildSlot {
        &mut self.slot
    }
}

/// Lays children out on columns and rows sized like a [`Flex`](crate::widgets::Flex) axis.
///
/// Layout is recomputed only when the available size or the structure changes.
/// Focus is remembered across blur/focus of the grid itself: a programmatic
/// [`Grid::set_focused`] reaches the child only while the grid holds focus, while a
/// click always focuses the clicked child.
pub struct Grid {
    columns: Vec<Sizing>,
    rows: Vec<Sizing>,
    children: Vec<GridChild>,
    ids: ChildIds,
    focus: FocusState,
    laid_out: Option<(i32, i32)>,
    force_layout: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn extend(sizes: &mut Vec<Sizing>, len: usize) {
    if sizes.len() < len {
        sizes.resize(len, Sizing::Proportional(1));
    }
}

/// Start and extent of `len` entries beginning at `from`; missing entries count as 0.
fn span(extents: &[i32], starts: &[i32], from: usize, len: usize) -> (i32, i32) {
    let start = starts
        .get(from)
        .copied()
        .unwrap_or_else(|| extents.iter().sum());
    let size = extents.iter().skip(from).take(len).sum();
    (start, size)
}

impl Grid {
    /// A grid with one proportional column and one proportional row.
    pub fn new() -> Self {
        Self {
            columns: vec![Sizing::Proportional(1)],
            rows: vec![Sizing::Proportional(1)],
            children: Vec::new(),
            ids: ChildIds::default(),
            focus: FocusState::gated(),
            laid_out: None,
            force_layout: false,
        }
    }

    /// Place `component` at `cell`, extending the column/row arrays as needed.
    pub fn add(&mut self, component: StdBox<dyn Component>, cell: GridCell) -> ChildId {
        extend(&mut self.columns, cell.column + cell.columns);
        extend(&mut self.rows, cell.row + cell.rows);
        let id = self.ids.next();
        self.children.push(GridChild {
            slot: ChildSlot::new(id, component),
            cell,
        });
        self.force_layout = true;
        id
    }

    /// Remove a child and hand it back; a focused child is blurred first.
    pub fn remove(&mut self, id: ChildId) -> Option<StdBox<dyn Component>> {
        let idx = position(&self.children, id)?;
        let mut child = self.children.remove(idx);
        if self.focus.focused() == Some(id) {
            child.slot.blur();
            self.focus.forget(id);
        }
        self.force_layout = true;
        Some(child.slot.into_target())
    }

    pub fn set_column(&mut self, column: usize, size: Sizing) {
        extend(&mut self.columns, column + 1);
        self.columns[column] = size;
        self.force_layout = true;
    }

    pub fn set_row(&mut self, row: usize, size: Sizing) {
        extend(&mut self.rows, row + 1);
        self.rows[row] = size;
        self.force_layout = true;
    }

    pub fn set_columns(&mut self, columns: Vec<Sizing>) {
        self.columns = columns;
        self.force_layout = true;
    }

    pub fn set_rows(&mut self, rows: Vec<Sizing>) {
        self.rows = rows;
        self.force_layout = true;
    }

    pub fn columns(&self) -> &[Sizing] {
        &self.columns
    }

    pub fn rows(&self) -> &[Sizing] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn ids(&self) -> Vec<ChildId> {
        self.children.iter().map(|child| child.slot.id()).collect()
    }

    pub fn child(&self, id: ChildId) -> Option<&dyn Component> {
        position(&self.children, id).map(|idx| self.children[idx].slot.target())
    }

    pub fn child_mut(&mut self, id: ChildId) -> Option<&mut dyn Component> {
        let idx = position(&self.children, id)?;
        Some(self.children[idx].slot.target_mut())
    }

    /// The child's rectangle from the most recent layout.
    pub fn region(&self, id: ChildId) -> Option<Region> {
        position(&self.children, id).map(|idx| self.children[idx].slot.region())
    }

    pub fn focused(&self) -> Option<ChildId> {
        self.focus.focused()
    }

    /// Whether the grid itself is on the focused path.
    pub fn focus_received(&self) -> bool {
        self.focus.received()
    }

    pub fn set_focused(&mut self, id: Option<ChildId>) {
        self.focus.set_focus(&mut self.children, id);
    }

    /// Called with `(previous, next)` whenever the focused child changes.
    pub fn set_on_focus_changed(
        &mut self,
        handler: impl FnMut(Option<ChildId>, Option<ChildId>) + 'static,
    ) {
        self.focus.set_on_change(handler);
    }

    fn layout(&mut self, width: i32, height: i32) {
        let column_widths = distribute(&self.columns, width);
        let column_starts = offsets(&column_widths);
        let row_heights = distribute(&self.rows, height);
        let row_starts = offsets(&row_heights);

        for child in &mut self.children {
            let cell = child.cell;
            let (x, w) = span(&column_widths, &column_starts, cell.column, cell.columns);
            let (y, h) = span(&row_heights, &row_starts, cell.row, cell.rows);
            child.slot.set_region(Region::new(x, y, w, h));
        }
        self.laid_out = Some((width, height));
        self.force_layout = false;
    }
}

impl Component for Grid {
    fn draw(&mut self, screen: &mut dyn Screen) {
        let size = screen.size();
        if self.force_layout || self.laid_out != Some(size) {
            self.layout(size.0, size.1);
        }
        self.focus.draw(&mut self.children, screen);
    }

    fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        self.focus.route_key(&mut self.children, event)
    }

    fn on_paste_event(&mut self, event: &PasteEvent) -> bool {
        self.focus.route_paste(&mut self.children, event)
    }

    fn on_mouse_event(&mut self, event: &MouseEvent) -> bool {
        self.focus.route_mouse(&mut self.children, event)
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for Grid {
    fn focus(&mut self) {
        self.focus.container_focus(&mut self.children);
    }

    fn blur(&mut self) {
        self.focus.container_blur(&mut self.children);
    }
}
