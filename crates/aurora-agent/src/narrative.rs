//! Canned narration for the simulated escalation and lateral-movement steps.
//!
//! These are story text only. Nothing here is executed.

use rand::seq::SliceRandom;
use rand::RngCore;

pub const ESCALATION_METHODS: &[&str] = &[
    "sudo misconfiguration (NOPASSWD /usr/bin/python3)",
    "SUID binary abuse (/usr/local/bin/custom_tool)",
    "writable service binary (CVE-2021-4034 Polkit)",
    "credential reuse from a shadow file dump",
];

pub const LATERAL_TECHNIQUES: &[&str] = &[
    "Pass-the-Hash via NTLM relay",
    "Kerberoasting service ticket extraction",
    "SSH agent forwarding from a compromised jump host",
    "WMI remote execution with harvested credentials",
];

/// Pick one entry uniformly. `options` must not be empty.
pub fn pick(options: &'static [&'static str], rng: &mut dyn RngCore) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}
