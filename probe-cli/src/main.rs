#[macro_use]
extern crate log;

use clap::Parser;
use probe_runtime::{ProbeError, Result};
use user_error::{UserFacingError, UFE};

use crate::options::ProbeOptions;

mod options;

/// Probes every requested library and prints its report.
/// Returns `true` when every probe succeeded.
fn run(options: &ProbeOptions) -> Result<bool> {
    let probes = options.probes();
    for probe in &probes {
        probe.validate()?;
    }

    let print_headers = probes.len() > 1;
    let mut all_succeeded = true;
    for probe in &probes {
        let outcome = probe.run();
        all_succeeded &= outcome.is_success();

        if print_headers {
            println!("{}:", probe.library().to_string_lossy());
        }
        println!("{}", outcome);
    }
    Ok(all_succeeded)
}

fn main() {
    env_logger::init();

    let options = ProbeOptions::parse();
    match run(&options) {
        Ok(all_succeeded) => {
            if options.strict && !all_succeeded {
                debug!("Exiting with failure in strict mode");
                std::process::exit(1);
            }
        }
        Err(error) => handle_application_error(error),
    }
}

pub fn handle_application_error(error: ProbeError) {
    let error: Box<dyn std::error::Error> = Box::new(error);
    let user_facing_error: UserFacingError = error.into();
    user_facing_error.print_and_exit();
}
