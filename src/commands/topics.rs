//! Implementation of the `landing-crew topics` command.

use crate::error::Result;
use crate::topics::{DEFAULT_TOPIC, TOPICS};

/// Execute the `landing-crew topics` command.
pub fn cmd_topics() -> Result<()> {
    for topic in TOPICS {
        if topic == DEFAULT_TOPIC {
            println!("{} (default)", topic);
        } else {
            println!("{}", topic);
        }
    }
    Ok(())
}
