use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use monero_account_sync::account::sync::LoggingEventHandler;
use monero_account_sync::account::{KeyType, TransferRecipient, TransferRequest};
use monero_account_sync::config::{AccountConfig, DEFAULT_RPC_URL};
use monero_account_sync::logging::init_logging;
use monero_account_sync::utils::{format_xmr_amount, parse_xmr_amount};
use monero_account_sync::{AccountError, AccountManager, WalletRpcClient};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
	#[arg(long, env = "MONERO_WALLET_RPC_URL", default_value = DEFAULT_RPC_URL, global = true)]
	rpc_url: String,

	#[arg(long, env = "ACCOUNT_REFRESH_PERIOD_SECS", default_value_t = 10, global = true)]
	refresh_secs: u64,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Follow the account and log every change
	Watch {
		/// Stop after this many seconds instead of waiting for Ctrl-C
		#[arg(long)]
		duration_secs: Option<u64>,
	},
	/// Print one of the wallet's keys
	Key {
		#[arg(value_enum)]
		key_type: KeyArg,
	},
	/// List incoming payments
	Payments {
		#[arg(long = "payment-id")]
		payment_ids: Vec<String>,

		#[arg(long)]
		min_height: Option<u64>,
	},
	/// Send XMR to one or more recipients
	Send {
		/// Recipient as ADDRESS:AMOUNT, amount in XMR
		#[arg(long = "to", required = true, value_parser = parse_recipient)]
		recipients: Vec<TransferRecipient>,

		#[arg(long)]
		payment_id: Option<String>,

		#[arg(long)]
		mix_count: Option<u64>,
	},
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KeyArg {
	Mnemonic,
	ViewKey,
	SpendKey,
}

impl From<KeyArg> for KeyType {
	fn from(key: KeyArg) -> Self {
		match key {
			KeyArg::Mnemonic => KeyType::Mnemonic,
			KeyArg::ViewKey => KeyType::ViewKey,
			KeyArg::SpendKey => KeyType::SpendKey,
		}
	}
}

fn parse_recipient(value: &str) -> Result<TransferRecipient, String> {
	let (address, amount) = value
		.rsplit_once(':')
		.ok_or_else(|| format!("expected ADDRESS:AMOUNT, got '{}'", value))?;
	let amount =
		parse_xmr_amount(amount).ok_or_else(|| format!("invalid XMR amount '{}'", amount))?;

	Ok(TransferRecipient::new(address, amount))
}

#[tokio::main]
async fn main() {
	init_logging();
	let args = Args::parse();

	let config = AccountConfig::new(args.rpc_url)
		.with_refresh_period(Duration::from_secs(args.refresh_secs));

	if let Err(e) = run(config, args.command).await {
		error!("{}", e);
		std::process::exit(1);
	}
}

async fn run(config: AccountConfig, command: Command) -> Result<(), AccountError> {
	let client = WalletRpcClient::new(&config)?;
	info!("Using wallet RPC at {}", client.rpc_url());
	let manager = AccountManager::new(Arc::new(client), config)?;

	match command {
		Command::Watch { duration_secs } => watch(&manager, duration_secs).await,
		Command::Key { key_type } => {
			let key = manager.query_key(key_type.into()).await?;
			println!("{}", key);
			Ok(())
		}
		Command::Payments {
			payment_ids,
			min_height,
		} => {
			let ids = (!payment_ids.is_empty()).then_some(payment_ids.as_slice());
			let payments = manager.query_payments(ids, min_height).await?;

			for payment in &payments {
				println!(
					"{} {} {} XMR at height {} (unlock time {})",
					payment.payment_id,
					payment.transaction_id,
					format_xmr_amount(payment.amount),
					payment.block_height,
					payment.unlock_time
				);
			}
			info!("{} payment(s)", payments.len());
			Ok(())
		}
		Command::Send {
			recipients,
			payment_id,
			mix_count,
		} => {
			let mut request = TransferRequest::new(recipients);
			request.payment_id = payment_id;
			if let Some(mix_count) = mix_count {
				request = request.with_mix_count(mix_count);
			}

			let result = manager.send_transaction(request).await;
			manager.dispose().await;

			for transaction_id in result? {
				println!("{}", transaction_id);
			}
			Ok(())
		}
	}
}

async fn watch(manager: &AccountManager, duration_secs: Option<u64>) -> Result<(), AccountError> {
	manager.subscribe(Box::new(LoggingEventHandler)).await;
	manager.initialize().await?;

	let stop = async {
		match duration_secs {
			Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
			None => {
				if let Err(e) = tokio::signal::ctrl_c().await {
					error!("Failed to listen for Ctrl-C: {}", e);
				}
			}
		}
	};

	stop.await;
	info!("Shutting down");

	manager.dispose_safely().await;

	let snapshot = manager.snapshot().await;
	if let Some(balance) = snapshot.balance {
		info!(
			"Final balance: {} XMR ({} XMR unlocked), {} transaction(s) holding {} XMR spendable",
			format_xmr_amount(balance.total),
			format_xmr_amount(balance.unlocked),
			snapshot.transactions.len(),
			format_xmr_amount(snapshot.spendable_total())
		);
	}
	Ok(())
}
