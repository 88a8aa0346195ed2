//! The compute-device collaborator contract: upload a read-only buffer,
//! launch a named kernel over an integer range, read back a buffer.
//! `ComputeDevice` is the seam the driver consumes, and `CpuDevice` is the
//! one concrete implementation this binary ships, standing in for whatever
//! real accelerator backend would sit behind the trait in a full deployment.

use rayon::prelude::*;

use crate::cards::CardSet;
use crate::error::EngineError;
use crate::five_subset::FIVE_SUBSETS;
use crate::kernel::{run_block, BLOCK_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSelection {
    All,
    Gpu,
    Cpu,
}

pub trait ComputeDevice: Send + Sync {
    fn name(&self) -> &str;

    /// Run the full board-enumeration kernel for one matchup's free table,
    /// in fixed-size blocks with a synchronous host tail, returning the
    /// packed `(alice_wins << 32) | bob_wins` grand total.
    fn enumerate(&self, alice: CardSet, bob: CardSet, free: &[CardSet], nop: bool) -> u64;
}

/// The only concrete device: rayon-parallel blocks over the five-subset
/// table, with the remainder (if `NUM_FIVE_SUBSETS` isn't a multiple of
/// `BLOCK_SIZE`) evaluated synchronously on the calling thread.
pub struct CpuDevice;

impl ComputeDevice for CpuDevice {
    fn name(&self) -> &str {
        "cpu"
    }

    fn enumerate(&self, alice: CardSet, bob: CardSet, free: &[CardSet], nop: bool) -> u64 {
        let total = FIVE_SUBSETS.len();
        let full_blocks = total / BLOCK_SIZE;
        let tail_start = full_blocks * BLOCK_SIZE;

        // Packed partial sums add component-wise: neither half ever
        // approaches 2^32, so plain u64 addition never carries across the
        // alice/bob boundary.
        let block_sum: u64 = (0..full_blocks)
            .into_par_iter()
            .map(|b| {
                let start = b * BLOCK_SIZE;
                let slice = &FIVE_SUBSETS[start..start + BLOCK_SIZE];
                run_block(alice, bob, free, slice, nop)
            })
            .sum();

        let tail = run_block(alice, bob, free, &FIVE_SUBSETS[tail_start..], nop);
        block_sum + tail
    }
}

/// Discover the devices implied by a `DeviceSelection`. This build carries
/// no GPU backend, so `Gpu` with nothing found is a device failure, not a
/// silent fallback — the user asked for a device class that doesn't exist
/// here.
pub fn discover_devices(selection: DeviceSelection) -> Result<Vec<Box<dyn ComputeDevice>>, EngineError> {
    match selection {
        DeviceSelection::Gpu => Err(EngineError::DeviceFailure {
            device: "gpu".to_string(),
            detail: "no GPU backend is compiled into this binary".to_string(),
        }),
        DeviceSelection::All | DeviceSelection::Cpu => Ok(vec![Box::new(CpuDevice)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card_encoding::free_table;
    use crate::cards::parse_board;
    use crate::kernel::unpack_wins;

    #[test]
    fn cpu_device_covers_every_five_subset() {
        let alice = CardSet::from_cards(&parse_board("AsAh").unwrap());
        let bob = CardSet::from_cards(&parse_board("KsKh").unwrap());
        let free = free_table(alice.union(bob));
        let packed = CpuDevice.enumerate(alice, bob, &free, false);
        let (a, b) = unpack_wins(packed);
        assert!((a + b) as usize <= FIVE_SUBSETS.len());
    }

    #[test]
    fn gpu_selection_is_a_device_failure() {
        assert!(discover_devices(DeviceSelection::Gpu).is_err());
    }

    #[test]
    fn all_and_cpu_selections_find_one_cpu_device() {
        assert_eq!(discover_devices(DeviceSelection::All).unwrap().len(), 1);
        assert_eq!(discover_devices(DeviceSelection::Cpu).unwrap().len(), 1);
    }
}
