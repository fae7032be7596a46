use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Replies from collaborators come back over this bus as later events; the
/// session controller drains it on every tick.
#[derive(Debug)]
pub enum SessionMessage {
    Action(crate::kernel::Action),
}

#[derive(Clone)]
pub struct SessionBusSender {
    tx: Sender<SessionMessage>,
}

pub struct SessionBusReceiver {
    rx: Receiver<SessionMessage>,
}

pub fn session_bus() -> (SessionBusSender, SessionBusReceiver) {
    let (tx, rx) = mpsc::channel();
    (SessionBusSender { tx }, SessionBusReceiver { rx })
}

impl SessionBusSender {
    pub fn send(&self, msg: SessionMessage) -> Result<(), mpsc::SendError<SessionMessage>> {
        self.tx.send(msg)
    }

    pub fn send_action(
        &self,
        action: crate::kernel::Action,
    ) -> Result<(), mpsc::SendError<SessionMessage>> {
        self.send(SessionMessage::Action(action))
    }
}

impl SessionBusReceiver {
    pub fn try_recv(&mut self) -> Result<SessionMessage, TryRecvError> {
        self.rx.try_recv()
    }
}
