//! Container child records and their identifiers.

use crate::core::component::{self, Component};
use crate::core::event::MouseEvent;
use crate::core::proxy::{ProxyScreen, Region};
use crate::core::screen::Screen;

/// Stable identifier for a child of one container.
///
/// Semantics:
/// - IDs are unique within the container that issued them.
/// - IDs are never reused for the lifetime of that container.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChildId(u64);

impl ChildId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Issues [`ChildId`]s for one container.
#[derive(Debug, Default)]
pub(crate) struct ChildIds {
    next_id: u64,
}

impl ChildIds {
    pub(crate) fn next(&mut self) -> ChildId {
        let id = ChildId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

/// A child owned by a container, with the rectangle it was last laid out in.
pub struct ChildSlot {
    id: ChildId,
    target: Box<dyn Component>,
    region: Region,
}

impl ChildSlot {
    pub(crate) fn new(id: ChildId, target: Box<dyn Component>) -> Self {
        Self {
            id,
            target,
            region: Region::default(),
        }
    }

    pub fn id(&self) -> ChildId {
        self.id
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub(crate) fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    pub fn target(&self) -> &dyn Component {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> &mut dyn Component {
        self.target.as_mut()
    }

    pub(crate) fn into_target(self) -> Box<dyn Component> {
        self.target
    }

    pub(crate) fn focus(&mut self) {
        component::focus(self.target.as_mut());
    }

    pub(crate) fn blur(&mut self) {
        component::blur(self.target.as_mut());
    }

    /// Draw the child through a clipping proxy for its region.
    pub(crate) fn draw(&mut self, parent: &mut dyn Screen) {
        let mut proxy = ProxyScreen::new(parent, self.region);
        self.target.draw(&mut proxy);
    }

    pub(crate) fn contains(&self, x: i32, y: i32) -> bool {
        self.region.contains(x, y)
    }

    /// Forward a parent-space mouse event, translated into the child's coordinates.
    pub(crate) fn forward_mouse(&mut self, event: &MouseEvent) -> bool {
        let local = self.region.to_local(event);
        self.target.on_mouse_event(&local)
    }
}

/// Access to the [`ChildSlot`] inside a container-specific child record.
pub(crate) trait HasSlot {
    fn slot(&self) -> &ChildSlot;
    fn slot_mut(&mut self) -> &mut ChildSlot;
}

impl HasSlot for ChildSlot {
    fn slot(&self) -> &ChildSlot {
        self
    }

    fn slot_mut(&mut self) -> &mut ChildSlot {
        self
    }
}
