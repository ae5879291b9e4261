//! Command bus using mpsc channels.
//!
//! The bus provides a simple request/response mechanism where:
//! - Any thread can send commands via `CommandSender::send()` or `post()`
//! - The page context drains them via `CommandBus::drain()`, answers each
//!   one, and publishes status events back on the same bus
//!
//! This is pure Rust with no external dependencies beyond std.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::types::{Ack, Command, StatusEvent};

/// A command plus the channel its [`Ack`] goes back on.
#[derive(Debug)]
pub struct Envelope {
    pub command: Command,
    reply: Option<Sender<Ack>>,
}

impl Envelope {
    /// Answer the command. Dropped requesters are ignored.
    pub fn reply(self, ack: Ack) {
        if let Some(reply) = self.reply {
            // Requester gone - nothing to answer
            let _ = reply.send(ack);
        }
    }
}

/// Command bus owned by one page context.
///
/// Uses a multi-producer, single-consumer (mpsc) channel internally.
/// Multiple senders can issue commands concurrently, and the page context
/// receives and processes them on its own thread.
///
/// # Example
///
/// ```
/// use lumbus_ruler::events::{Command, CommandBus};
///
/// let bus = CommandBus::new();
/// let sender = bus.sender();
///
/// sender.post(Command::RestorePage);
///
/// let commands = bus.drain();
/// assert_eq!(commands.len(), 1);
/// ```
pub struct CommandBus {
    sender: Sender<Envelope>,
    receiver: Receiver<Envelope>,
    status_tx: Sender<StatusEvent>,
    status_rx: Receiver<StatusEvent>,
}

impl CommandBus {
    /// Create a new command bus.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        let (status_tx, status_rx) = mpsc::channel();
        Self {
            sender,
            receiver,
            status_tx,
            status_rx,
        }
    }

    /// Get a sender handle that can be cloned and sent to other threads.
    pub fn sender(&self) -> CommandSender {
        CommandSender {
            sender: self.sender.clone(),
        }
    }

    /// Try to receive the next command without blocking.
    pub fn try_recv(&self) -> Option<Envelope> {
        match self.receiver.try_recv() {
            Ok(envelope) => Some(envelope),
            Err(TryRecvError::Empty) => None,
            // Unreachable while the bus holds its own sender
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending commands into a Vec.
    pub fn drain(&self) -> Vec<Envelope> {
        let mut envelopes = Vec::new();
        while let Some(envelope) = self.try_recv() {
            envelopes.push(envelope);
        }
        envelopes
    }

    /// Publish a status event back to the command side.
    pub fn publish_status(&self, event: StatusEvent) {
        let _ = self.status_tx.send(event);
    }

    /// Drain status events published since the last call.
    pub fn drain_status(&self) -> Vec<StatusEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.status_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable, thread-safe command sender.
#[derive(Clone)]
pub struct CommandSender {
    sender: Sender<Envelope>,
}

impl CommandSender {
    /// Send a command and get a receiver for its acknowledgement.
    ///
    /// If the bus has been dropped the receiver reports a disconnect.
    pub fn send(&self, command: Command) -> Receiver<Ack> {
        let (reply, ack) = mpsc::channel();
        let _ = self.sender.send(Envelope {
            command,
            reply: Some(reply),
        });
        ack
    }

    /// Send a command without waiting for an acknowledgement.
    pub fn post(&self, command: Command) {
        // Ignore send errors - bus dropped means the page is gone
        let _ = self.sender.send(Envelope {
            command,
            reply: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_bus() {
        let bus = CommandBus::new();
        assert!(bus.drain().is_empty());
        assert!(bus.drain_status().is_empty());
    }

    #[test]
    fn test_commands_arrive_in_order() {
        let bus = CommandBus::new();
        let sender = bus.sender();

        sender.post(Command::RestorePage);
        sender.post(Command::UpdateRulerColor {
            color: "#fff".to_string(),
        });

        let commands: Vec<_> = bus.drain().into_iter().map(|e| e.command).collect();
        assert_eq!(
            commands,
            vec![
                Command::RestorePage,
                Command::UpdateRulerColor {
                    color: "#fff".to_string()
                }
            ]
        );
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_send_receives_reply() {
        let bus = CommandBus::new();
        let ack = bus.sender().send(Command::RestorePage);

        for envelope in bus.drain() {
            envelope.reply(Ack::ok());
        }
        assert_eq!(ack.try_recv().unwrap(), Ack::ok());
    }

    #[test]
    fn test_reply_to_dropped_requester_is_ignored() {
        let bus = CommandBus::new();
        drop(bus.sender().send(Command::RestorePage));
        for envelope in bus.drain() {
            envelope.reply(Ack::ok());
        }
    }

    #[test]
    fn test_sender_from_other_thread() {
        let bus = CommandBus::new();
        let sender = bus.sender();
        std::thread::spawn(move || sender.post(Command::RestorePage))
            .join()
            .unwrap();
        assert_eq!(bus.drain().len(), 1);
    }

    #[test]
    fn test_status_roundtrip() {
        let bus = CommandBus::new();
        bus.publish_status(StatusEvent::RulerDisabled);
        bus.publish_status(StatusEvent::PageRestored);
        assert_eq!(
            bus.drain_status(),
            vec![StatusEvent::RulerDisabled, StatusEvent::PageRestored]
        );
    }
}
