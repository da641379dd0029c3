use std::sync::{Arc, Barrier};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::error::SortError;

/// Rank of the process that owns input, planning and the final merge.
pub(crate) const COORDINATOR: usize = 0;

/// One rank's handle into a fixed group of message passing peers.
///
/// `mesh` wires a dedicated zero capacity channel for every ordered
/// (sender, receiver) pair, so a send blocks until the destination accepts the
/// frame and frames between one fixed pair arrive in send order. There is no
/// ordering across different senders, no self channel, and no timeout anywhere.
/// Membership is fixed at construction; the handles are moved into their node
/// threads and never shared.
pub(crate) struct WorkerGroup {
    rank: usize,
    senders: Vec<Option<Sender<Vec<u8>>>>,
    receivers: Vec<Option<Receiver<Vec<u8>>>>,
    barrier: Arc<Barrier>,
}

impl WorkerGroup {
    /// Build the full mesh and return one handle per rank, in rank order.
    pub(crate) fn mesh(size: usize) -> Vec<WorkerGroup> {
        let barrier = Arc::new(Barrier::new(size));
        let mut senders: Vec<Vec<Option<Sender<Vec<u8>>>>> = (0..size)
            .map(|_| (0..size).map(|_| None).collect())
            .collect();
        let mut receivers: Vec<Vec<Option<Receiver<Vec<u8>>>>> = (0..size)
            .map(|_| (0..size).map(|_| None).collect())
            .collect();
        for source in 0..size {
            for destination in 0..size {
                if source == destination {
                    continue;
                }
                let (tx, rx) = bounded(0);
                senders[source][destination] = Some(tx);
                receivers[destination][source] = Some(rx);
            }
        }
        senders
            .into_iter()
            .zip(receivers)
            .enumerate()
            .map(|(rank, (senders, receivers))| WorkerGroup {
                rank,
                senders,
                receivers,
                barrier: barrier.clone(),
            })
            .collect()
    }

    pub(crate) fn rank(&self) -> usize {
        self.rank
    }

    pub(crate) fn size(&self) -> usize {
        self.senders.len()
    }

    /// Blocks until `destination` accepts the frame.
    pub(crate) fn send(&self, destination: usize, frame: Vec<u8>) -> Result<(), SortError> {
        match &self.senders[destination] {
            Some(sender) => {
                sender.send(frame).or_else(|_| Err(SortError::ProtocolStall { peer: destination }))
            }
            None => Err(SortError::ProtocolStall { peer: destination }),
        }
    }

    /// Blocks until the next frame from `source` arrives.
    pub(crate) fn recv(&self, source: usize) -> Result<Vec<u8>, SortError> {
        match &self.receivers[source] {
            Some(receiver) => {
                receiver.recv().or_else(|_| Err(SortError::ProtocolStall { peer: source }))
            }
            None => Err(SortError::ProtocolStall { peer: source }),
        }
    }

    /// Collective delivery of one scalar from `root` to every rank.
    ///
    /// Every rank must call this with the same `root`; the value argument of
    /// non root ranks is ignored. Blocks until all ranks have participated.
    pub(crate) fn broadcast(&self, root: usize, value: u64) -> Result<u64, SortError> {
        if self.rank == root {
            for peer in 0..self.size() {
                if peer == root {
                    continue;
                }
                self.send(peer, value.to_le_bytes().to_vec())?;
            }
            Ok(value)
        } else {
            let frame = self.recv(root)?;
            match <[u8; 8]>::try_from(frame.as_slice()) {
                Ok(bytes) => Ok(u64::from_le_bytes(bytes)),
                Err(_) => Err(SortError::ProtocolStall { peer: root }),
            }
        }
    }

    /// Blocks until every rank in the group has arrived. Called once per rank,
    /// at node exit.
    pub(crate) fn barrier(&self) {
        self.barrier.wait();
    }
}
