//! Boundary-row exchange between neighboring workers
//!
//! Workers form a linear chain; each adjacent pair is wired with one
//! channel per direction. At a sync point a worker first issues both
//! outbound sends (channel sends never block), then jointly awaits both
//! inbound payloads, mirroring a non-blocking send/receive pair that is
//! waited on together. Received rows overwrite the halo rows of both
//! buffers; no merging happens on receipt.

use std::sync::mpsc::{Receiver, Sender};

use crate::core::error::{Result, SimError};
use crate::engine::partition::Partition;
use crate::engine::scheduler::HaloSync;
use crate::grid::board::GridStore;
use crate::grid::cell::Cell;

/// Flattened rows of raw cell state.
pub type HaloPayload = Vec<Cell>;

/// Both directions of the channel pair shared with one neighbor.
pub struct NeighborLink {
    pub neighbor: usize,
    pub tx: Sender<HaloPayload>,
    pub rx: Receiver<HaloPayload>,
}

/// Per-worker exchanger. A worker at a grid edge (or next to a degenerate
/// zero-row worker) simply has no link on that side.
pub struct HaloExchanger {
    partition: Partition,
    prev: Option<NeighborLink>,
    next: Option<NeighborLink>,
}

impl HaloExchanger {
    pub fn new(
        partition: Partition,
        prev: Option<NeighborLink>,
        next: Option<NeighborLink>,
    ) -> Self {
        Self {
            partition,
            prev,
            next,
        }
    }

    fn send_boundaries(&self, store: &GridStore) -> Result<()> {
        let boundary = self.partition.boundary_rows();
        if let Some(link) = &self.prev {
            let payload = store.copy_rows(self.partition.prev_halo, boundary);
            link.tx.send(payload).map_err(|_| SimError::HaloExchange {
                neighbor: link.neighbor,
                reason: "send channel disconnected".into(),
            })?;
        }
        if let Some(link) = &self.next {
            let first = self.partition.prev_halo + self.partition.owned - boundary;
            let payload = store.copy_rows(first, boundary);
            link.tx.send(payload).map_err(|_| SimError::HaloExchange {
                neighbor: link.neighbor,
                reason: "send channel disconnected".into(),
            })?;
        }
        Ok(())
    }

    fn receive_halos(&self, store: &mut GridStore) -> Result<()> {
        let width = store.read().width();
        if let Some(link) = &self.prev {
            let payload = Self::await_payload(link, self.partition.prev_halo * width)?;
            store.overwrite_rows(0, self.partition.prev_halo, &payload);
        }
        if let Some(link) = &self.next {
            let payload = Self::await_payload(link, self.partition.next_halo * width)?;
            store.overwrite_rows(
                self.partition.prev_halo + self.partition.owned,
                self.partition.next_halo,
                &payload,
            );
        }
        Ok(())
    }

    fn await_payload(link: &NeighborLink, expected_len: usize) -> Result<HaloPayload> {
        let payload = link.rx.recv().map_err(|_| SimError::HaloExchange {
            neighbor: link.neighbor,
            reason: "receive channel disconnected".into(),
        })?;
        if payload.len() != expected_len {
            return Err(SimError::HaloExchange {
                neighbor: link.neighbor,
                reason: format!(
                    "payload holds {} cells, expected {}",
                    payload.len(),
                    expected_len
                ),
            });
        }
        Ok(payload)
    }
}

impl HaloSync for HaloExchanger {
    fn sync(&mut self, store: &mut GridStore) -> Result<()> {
        self.send_boundaries(store)?;
        self.receive_halos(store)
    }
}
