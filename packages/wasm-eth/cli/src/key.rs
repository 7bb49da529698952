use anyhow::{Context, Result};
use clap::Subcommand;
use wasm_eth::PrivateKey;

#[derive(Subcommand)]
pub enum KeyCommand {
    /// Print the address controlled by a private key
    Address {
        /// Private key as 0x-prefixed 32-byte hex
        #[arg(long, env = "ETH_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
        /// Print the public key as well
        #[arg(long)]
        public_key: bool,
    },
}

pub fn handle_command(command: KeyCommand) -> Result<()> {
    match command {
        KeyCommand::Address {
            private_key,
            public_key,
        } => {
            let key = PrivateKey::from_hex(private_key.trim()).context("Invalid private key")?;
            println!("{}", key.address().to_checksum());
            if public_key {
                println!("0x{}", hex::encode(key.public_key()));
            }
            Ok(())
        }
    }
}
