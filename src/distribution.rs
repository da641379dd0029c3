//! Record distribution over the worker group.
//!
//! Both directions move one record at a time, in partition order, each record
//! as two frames: a 4 byte little endian length followed by the encoded record
//! bytes. All sends are synchronous, so a transfer fully serializes against
//! its peer; the coordinator never overlaps transfers to or from different
//! workers.

use crate::error::SortError;
use crate::plan::PartitionPlan;
use crate::record::Record;
use crate::worker_group::{WorkerGroup, COORDINATOR};

/// Coordinator side scatter. Sends every non coordinator rank its partition
/// and returns the coordinator's own partition, copied straight from the in
/// memory input with no self message.
pub(crate) fn scatter(
    group: &WorkerGroup,
    records: &[Record],
    plan: &PartitionPlan,
    field_separator: char,
) -> Result<Vec<Record>, SortError> {
    for peer in 1..group.size() {
        send_partition(group, peer, &records[plan.range(peer)], field_separator)?;
        log::debug!("Scattered {} records to worker {}", plan.size(peer), peer);
    }
    Ok(records[plan.range(COORDINATOR)].to_vec())
}

/// Send a partition to one peer, record at a time, in order.
pub(crate) fn send_partition(
    group: &WorkerGroup,
    destination: usize,
    records: &[Record],
    field_separator: char,
) -> Result<(), SortError> {
    for record in records {
        let line = record.encode(field_separator);
        group.send(destination, (line.len() as u32).to_le_bytes().to_vec())?;
        group.send(destination, line.into_bytes())?;
    }
    Ok(())
}

/// Receive exactly `size` records from one peer, in send order.
pub(crate) fn recv_partition(
    group: &WorkerGroup,
    source: usize,
    size: usize,
    field_separator: char,
) -> Result<Vec<Record>, SortError> {
    let mut partition = Vec::with_capacity(size);
    for _ in 0..size {
        let header = group.recv(source)?;
        let length = match <[u8; 4]>::try_from(header.as_slice()) {
            Ok(bytes) => u32::from_le_bytes(bytes) as usize,
            Err(_) => return Err(SortError::ProtocolStall { peer: source }),
        };
        let payload = group.recv(source)?;
        debug_assert_eq!(payload.len(), length);
        let line = String::from_utf8_lossy(&payload);
        partition.push(Record::decode(&line, field_separator)?);
    }
    Ok(partition)
}
