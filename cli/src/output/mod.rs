//! Output formatting module

pub mod json;

use hammertime_common::MicroVm;

/// Print the state name of `microvm` on its own line, e.g. `CREATED`.
pub fn print_state(microvm: &MicroVm) {
    println!("{}", microvm.state_name());
}
