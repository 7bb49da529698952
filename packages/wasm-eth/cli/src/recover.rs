use anyhow::{Context, Result};
use clap::Subcommand;
use wasm_eth::{recover, recover_signed, Address};

use crate::input::{decode_hex, read_hex_arg};

#[derive(Subcommand)]
pub enum RecoverCommand {
    /// Recover the public key for a raw transaction and an explicit signature
    Recover {
        /// Raw transaction hex (use '-' to read from stdin)
        raw: String,
        /// Recovery value, 27 or 28
        #[arg(long)]
        v: u64,
        /// Signature r as hex
        #[arg(long)]
        r: String,
        /// Signature s as hex
        #[arg(long)]
        s: String,
    },
    /// Recover the signer of a fully signed raw transaction
    RecoverSigned {
        /// Raw transaction hex (use '-' to read from stdin)
        raw: String,
    },
}

pub fn handle_command(command: RecoverCommand) -> Result<()> {
    match command {
        RecoverCommand::Recover { raw, v, r, s } => {
            let raw = read_hex_arg(&raw)?;
            let r = decode_hex(&r).context("Invalid 'r'")?;
            let s = decode_hex(&s).context("Invalid 's'")?;
            let public_key =
                recover(raw.as_str(), v, &r, &s).context("Failed to recover public key")?;
            println!("publicKey: 0x{}", hex::encode(public_key));
            println!(
                "address:   {}",
                Address::from_public_key(&public_key).to_checksum()
            );
            Ok(())
        }
        RecoverCommand::RecoverSigned { raw } => {
            let raw = read_hex_arg(&raw)?;
            let signer = recover_signed(raw.as_str()).context("Failed to recover signer")?;
            println!("publicKey: 0x{}", hex::encode(signer.public_key));
            println!("address:   {}", signer.address.to_checksum());
            Ok(())
        }
    }
}
