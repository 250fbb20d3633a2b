use std::io::{self, Stderr, Stdout, Write};

use alloy::primitives::utils::format_ether;

use super::{Reporter, RunEvent};

/// Renders run events for an operator: progress on stdout, warnings on stderr
pub struct ConsoleReporter<O, E> {
    out: O,
    err: E,
}

impl ConsoleReporter<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    fn render(&mut self, event: &RunEvent) -> io::Result<()> {
        match event {
            RunEvent::SignerSelected(address) => {
                writeln!(self.out, "Deploying contracts with the account: {}", address)
            }
            RunEvent::Network(network) => writeln!(self.out, "Network: {}", network),
            RunEvent::Balance(balance) => {
                writeln!(self.out, "Account balance: {} ETH", format_ether(*balance))
            }
            RunEvent::Advisory(advisory) => writeln!(self.err, "Warning: {}", advisory),
            RunEvent::Deploying(name) => writeln!(self.out, "\nDeploying {}...", name),
            RunEvent::Deployed(record) => {
                writeln!(self.out, "{} deployed to: {}", record.name, record.address)
            }
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Reporter for ConsoleReporter<O, E> {
    fn report(&mut self, event: RunEvent) {
        if let Err(e) = self.render(&event) {
            tracing::warn!("Failed to write progress: {}", e);
        }
    }
}
