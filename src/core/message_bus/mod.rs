//=========================================================================
// Message Bus
//=========================================================================
//
// Per-tick typed mailbox shared by the input layer and the game.
//
// Architecture:
//   GlobalSystems → push(RunnerAction / HorizontalAxis)
//   Runner        → push(PlayerEvent) ─┐
//                                      ↓
//   readers       ← read::<M>()  (any number, same tick)
//                                      ↓
//   GlobalSystems → clear_all() at the start of the next tick
//
// Nothing survives a tick boundary: a message is visible from the moment
// it is pushed until the next `clear_all`.
//
//=========================================================================

//=== Module Declarations =================================================

mod message_queue;

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use message_queue::MessageQueue;

//=== Message =============================================================

/// Marker for anything that can travel on the [`MessageBus`].
///
/// Blanket-implemented for every `Send + 'static` type.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageBus ==========================================================

/// One queue per message type, keyed by `TypeId`.
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Writing ----------------------------------------------------------

    /// Appends a message to the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        if let Some(queue) = self.queue_mut::<M>() {
            queue.push(msg);
        }
    }

    /// Appends every message of an iterator, preserving order.
    pub fn extend<M: Message, I: IntoIterator<Item = M>>(&mut self, msgs: I) {
        if let Some(queue) = self.queue_mut::<M>() {
            queue.extend(msgs);
        }
    }

    fn queue_mut<M: Message>(&mut self) -> Option<&mut Vec<M>> {
        self.queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()))
            .as_any_mut()
            .downcast_mut::<Vec<M>>()
    }

    //--- Reading ----------------------------------------------------------

    /// Messages of type `M` pushed since the last clear, oldest first.
    ///
    /// Reading does not consume; every reader sees the same slice.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Most recent message of type `M`, if any.
    pub fn latest<M: Message>(&self) -> Option<&M> {
        self.read::<M>().last()
    }

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map_or(0, Vec::len)
    }

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }

    //--- Clearing ---------------------------------------------------------

    /// Drops all messages of type `M`, keeping the allocation.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Drops every queued message of every type, keeping allocations.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    /// Total number of queued messages across all types.
    pub fn total(&self) -> usize {
        self.queues.values().map(|q| q.len()).sum()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
