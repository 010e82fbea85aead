//! Flex container: children laid out along one axis.

use std::boxed::Box as StdBox;

use crate::core::child::{ChildId, ChildIds, ChildSlot, HasSlot};
use crate::core::component::{Component, Focusable};
use crate::core::event::{KeyEvent, MouseEvent, PasteEvent};
use crate::core::focus::{position, FocusState};
use crate::core::proxy::Region;
use crate::core::screen::Screen;
use crate::core::sizing::{distribute, offsets, Sizing};

/// Main axis of a [`Flex`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Children side by side; sizes are widths.
    #[default]
    Horizontal,
    /// Children stacked top to bottom; sizes are heights.
    Vertical,
}

struct FlexChild {
    slot: ChildSlot,
    size: Sizing,
}

impl HasSlot for FlexChild {
    fn slot(&self) -> &ChildSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ChildSlot {
        &mut self.slot
    }
}

/// Arranges children along one axis with fixed and proportional sizes.
///
/// Focus moves between children by clicking or [`Flex::set_focused`]. Focusing the
/// flex itself does nothing; blurring it blurs and forgets the focused child.
pub struct Flex {
    direction: Direction,
    children: Vec<FlexChild>,
    ids: ChildIds,
    focus: FocusState,
}

impl Default for Flex {
    fn default() -> Self {
        Self::new(Direction::default())
    }
}

impl Flex {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            children: Vec::new(),
            ids: ChildIds::default(),
            focus: FocusState::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn add(&mut self, component: StdBox<dyn Component>, size: Sizing) -> ChildId {
        let id = self.ids.next();
        self.children.push(FlexChild {
            slot: ChildSlot::new(id, component),
            size,
        });
        id
    }

    pub fn add_fixed(&mut self, component: StdBox<dyn Component>, cells: i32) -> ChildId {
        self.add(component, Sizing::Fixed(cells))
    }

    pub fn add_proportional(&mut self, component: StdBox<dyn Component>, weight: i32) -> ChildId {
        self.add(component, Sizing::Proportional(weight))
    }

    /// Remove a child and hand it back; a focused child is blurred first.
    pub fn remove(&mut self, id: ChildId) -> Option<StdBox<dyn Component>> {
        let idx = position(&self.children, id)?;
        let mut child = self.children.remove(idx);
        if self.focus.focused() == Some(id) {
            child.slot.blur();
            self.focus.forget(id);
        }
        Some(child.slot.into_target())
    }

    pub fn set_size(&mut self, id: ChildId, size: Sizing) -> bool {
        match position(&self.children, id) {
            Some(idx) => {
                self.children[idx].size = size;
                true
            }
            None => false,
        }
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

    /// The child's rectangle from the most recent draw.
    pub fn region(&self, id: ChildId) -> Option<Region> {
        position(&self.children, id).map(|idx| self.children[idx].slot.region())
    }

    pub fn focused(&self) -> Option<ChildId> {
        self.focus.focused()
    }

    /// Move focus to `id` (blurring the previous child), or clear it with `None`.
    pub fn set_focused(&mut self, id: Option<ChildId>) {
        self.focus.set_focus(&mut self.children, id);
    }

    fn layout(&mut self, width: i32, height: i32) {
        let sizes: Vec<Sizing> = self.children.iter().map(|child| child.size).collect();
        let main = match self.direction {
            Direction::Horizontal => width,
            Direction::Vertical => height,
        };
        let extents = distribute(&sizes, main);
        let starts = offsets(&extents);
        for ((child, extent), start) in self.children.iter_mut().zip(extents).zip(starts) {
            let region = match self.direction {
                Direction::Horizontal => Region::new(start, 0, extent, height),
                Direction::Vertical => Region::new(0, start, width, extent),
            };
            child.slot.set_region(region);
        }
    }
}

impl Component for Flex {
    fn draw(&mut self, screen: &mut dyn Screen) {
        let (width, height) = screen.size();
        self.layout(width, height);
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

impl Focusable for Flex {
    fn focus(&mut self) {}

    fn blur(&mut self) {
        self.focus.container_blur(&mut self.children);
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Flex};
    use crate::core::buffer::CellBuffer;
    use crate::core::component::{Component, Focusable};
    use crate::core::event::{KeyEvent, MouseEvent};
    use crate::core::proxy::Region;
    use crate::core::screen::Screen;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Fill {
        ch: char,
        focused: Rc<RefCell<bool>>,
        keys: Rc<RefCell<usize>>,
    }

    impl Component for Fill {
        fn draw(&mut self, screen: &mut dyn Screen) {
            screen.fill(self.ch, Default::default());
        }

        fn on_key_event(&mut self, _event: &KeyEvent) -> bool {
            *self.keys.borrow_mut() += 1;
            true
        }

        fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
            Some(self)
        }
    }

    impl Focusable for Fill {
        fn focus(&mut self) {
            *self.focused.borrow_mut() = true;
        }

        fn blur(&mut self) {
            *self.focused.borrow_mut() = false;
        }
    }

    fn fill(ch: char) -> (Box<Fill>, Rc<RefCell<bool>>, Rc<RefCell<usize>>) {
        let focused = Rc::new(RefCell::new(false));
        let keys = Rc::new(RefCell::new(0));
        (
            Box::new(Fill {
                ch,
                focused: Rc::clone(&focused),
                keys: Rc::clone(&keys),
            }),
            focused,
            keys,
        )
    }

    #[test]
    fn fixed_and_weighted_widths() {
        let mut flex = Flex::new(Direction::Horizontal);
        let a = flex.add_fixed(fill('a').0, 10);
        let b = flex.add_proportional(fill('b').0, 1);
        let c = flex.add_proportional(fill('c').0, 3);

        let mut buffer = CellBuffer::new(50, 2);
        flex.draw(&mut buffer);

        assert_eq!(flex.region(a), Some(Region::new(0, 0, 10, 2)));
        assert_eq!(flex.region(b), Some(Region::new(10, 0, 10, 2)));
        assert_eq!(flex.region(c), Some(Region::new(20, 0, 30, 2)));
        assert_eq!(
            buffer.line(1),
            format!("{}{}{}", "a".repeat(10), "b".repeat(10), "c".repeat(30))
        );
    }

    #[test]
    fn vertical_stacks_rows() {
        let mut flex = Flex::new(Direction::Vertical);
        flex.add_fixed(fill('a').0, 1);
        flex.add_proportional(fill('b').0, 1);
        let mut buffer = CellBuffer::new(3, 3);
        flex.draw(&mut buffer);
        assert_eq!(buffer.lines(), vec!["aaa", "bbb", "bbb"]);
    }

    #[test]
    fn keys_reach_only_focused_child() {
        let mut flex = Flex::default();
        let (first, _, first_keys) = fill('a');
        let (second, second_focused, second_keys) = fill('b');
        flex.add_proportional(first, 1);
        let b = flex.add_proportional(second, 1);

        assert!(!flex.on_key_event(&KeyEvent::char('x')));

        flex.set_focused(Some(b));
        assert!(*second_focused.borrow());
        assert!(flex.on_key_event(&KeyEvent::char('x')));
        assert_eq!(*first_keys.borrow(), 0);
        assert_eq!(*second_keys.borrow(), 1);
    }

    #[test]
    fn click_moves_focus_between_children() {
        let mut flex = Flex::default();
        let (first, first_focused, _) = fill('a');
        let (second, second_focused, _) = fill('b');
        let a = flex.add_fixed(first, 5);
        let b = flex.add_fixed(second, 5);
        let mut buffer = CellBuffer::new(10, 1);
        flex.draw(&mut buffer);

        assert!(flex.on_mouse_event(&MouseEvent::click(1, 0)));
        assert_eq!(flex.focused(), Some(a));
        assert!(*first_focused.borrow());

        assert!(flex.on_mouse_event(&MouseEvent::click(5, 0)));
        assert_eq!(flex.focused(), Some(b));
        assert!(!*first_focused.borrow());
        assert!(*second_focused.borrow());
    }

    #[test]
    fn removing_focused_child_clears_focus() {
        let mut flex = Flex::default();
        let (child, focused, _) = fill('a');
        let id = flex.add_proportional(child, 1);
        flex.set_focused(Some(id));

        assert!(flex.remove(id).is_some());
        assert_eq!(flex.focused(), None);
        assert!(!*focused.borrow());
        assert!(flex.is_empty());
        assert!(flex.remove(id).is_none());
    }

    #[test]
    fn blur_cascades_and_focus_is_noop() {
        let mut flex = Flex::default();
        let (child, focused, _) = fill('a');
        let id = flex.add_proportional(child, 1);
        flex.set_focused(Some(id));

        flex.blur();
        assert_eq!(flex.focused(), None);
        assert!(!*focused.borrow());

        flex.focus();
        assert_eq!(flex.focused(), None);
        assert!(!*focused.borrow());
    }

    #[test]
    fn empty_flex_draws_nothing() {
        let mut flex = Flex::default();
        let mut buffer = CellBuffer::new(4, 1);
        flex.draw(&mut buffer);
        assert_eq!(buffer.line(0), "    ");
        assert!(!flex.on_mouse_event(&MouseEvent::click(0, 0)));
    }
}
