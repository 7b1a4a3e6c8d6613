//! Block payloads for the system profile and bashrc

use std::path::Path;

/// Payload for the profile block: login shells pull in the system bashrc.
pub fn profile_block(bashrc: &Path) -> String {
    let bashrc = bashrc.display();
    format!("if [ -f {bashrc} ]; then\n    . {bashrc}\nfi\n")
}

/// Payload for the bashrc block: interactive shells source the bind script.
pub fn bashrc_block(bind_script: &Path) -> String {
    let script = bind_script.display();
    format!("if [[ $- == *i* ]] && [[ -f {script} ]]; then\n    source {script}\nfi\n")
}
