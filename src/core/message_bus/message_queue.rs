//=========================================================================
// Message Queue
//=========================================================================
//
// Type-erased view of a `Vec<M>` so the bus can hold queues of different
// message types in one map and still clear them without knowing `M`.
//
//=========================================================================

use std::any::Any;

use super::Message;

/// Erased queue operations used by [`super::MessageBus`].
pub(super) trait MessageQueue: Send {
    /// Empties the queue, keeping capacity.
    fn clear_queue(&mut self);

    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
