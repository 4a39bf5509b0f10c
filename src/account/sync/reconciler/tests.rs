use super::*;

fn output(transaction_id: &str, amount: u64, is_spendable: bool) -> Output {
	Output {
		transaction_id: transaction_id.to_string(),
		amount,
		is_spendable,
	}
}

fn received_ids(events: &[AccountEvent]) -> Vec<String> {
	events
		.iter()
		.filter_map(|e| match e {
			AccountEvent::TransactionReceived { transaction } => {
				Some(transaction.transaction_id.clone())
			}
			_ => None,
		})
		.collect()
}

fn changed_indices(events: &[AccountEvent]) -> Vec<usize> {
	events
		.iter()
		.filter_map(|e| match e {
			AccountEvent::TransactionChanged { index, .. } => Some(*index),
			_ => None,
		})
		.collect()
}

// =========================================================================
// Grouping
// =========================================================================

#[test]
fn groups_contiguous_runs_and_partitions_amounts() {
	let outputs = vec![
		output("a", 100, true),
		output("a", 50, false),
		output("b", 200, true),
	];

	let transactions = group_outputs(&outputs);

	assert_eq!(
		transactions,
		vec![
			Transaction {
				transaction_id: "a".into(),
				index: 0,
				amount_spendable: 100,
				amount_unspendable: 50,
			},
			Transaction {
				transaction_id: "b".into(),
				index: 1,
				amount_spendable: 200,
				amount_unspendable: 0,
			},
		]
	);
}

#[test]
fn run_count_matches_transaction_count() {
	let outputs = vec![
		output("a", 1, true),
		output("a", 2, true),
		output("a", 3, false),
		output("b", 4, false),
		output("c", 5, true),
		output("c", 6, true),
	];

	let transactions = group_outputs(&outputs);

	assert_eq!(transactions.len(), 3);
	assert_eq!(transactions[0].amount_spendable, 3);
	assert_eq!(transactions[0].amount_unspendable, 3);
	assert_eq!(transactions[1].amount_spendable, 0);
	assert_eq!(transactions[1].amount_unspendable, 4);
	assert_eq!(transactions[2].amount_spendable, 11);
	assert!(transactions.iter().enumerate().all(|(i, t)| t.index == i));
}

#[test]
fn non_adjacent_outputs_split_into_separate_entries() {
	let outputs = vec![output("a", 1, true), output("b", 2, true), output("a", 3, true)];

	let ids: Vec<_> = group_outputs(&outputs)
		.into_iter()
		.map(|t| t.transaction_id)
		.collect();

	assert_eq!(ids, vec!["a", "b", "a"]);
}

#[test]
fn empty_outputs_produce_empty_list_and_no_events() {
	let previous = group_outputs(&[output("a", 1, true)]);

	let result = reconcile(&previous, true, &[]);

	assert!(result.transactions.is_empty());
	assert!(result.events.is_empty());
}

// =========================================================================
// Diffing
// =========================================================================

#[test]
fn first_pass_is_silent() {
	let outputs = vec![output("a", 1, true), output("b", 2, true)];

	let result = reconcile(&[], false, &outputs);

	assert_eq!(result.transactions.len(), 2);
	assert!(result.events.is_empty());
}

#[test]
fn reconciling_same_outputs_twice_is_idempotent() {
	let outputs = vec![output("a", 10, true), output("a", 5, false), output("b", 7, true)];

	let first = reconcile(&[], true, &outputs);
	let second = reconcile(&first.transactions, true, &outputs);

	assert_eq!(second.transactions, first.transactions);
	assert!(second.events.is_empty());
}

#[test]
fn appended_transactions_are_received_in_order() {
	let mut outputs = vec![output("a", 10, true), output("b", 20, true)];
	let first = reconcile(&[], false, &outputs);

	outputs.push(output("c", 30, true));
	outputs.push(output("c", 1, false));
	outputs.push(output("d", 40, false));
	let second = reconcile(&first.transactions, true, &outputs);

	assert_eq!(received_ids(&second.events), vec!["c", "d"]);
	assert!(changed_indices(&second.events).is_empty());
}

#[test]
fn new_spendable_output_changes_existing_transaction() {
	let first = reconcile(&[], false, &[output("a", 10, true), output("b", 20, true)]);

	let second = reconcile(
		&first.transactions,
		true,
		&[output("a", 10, true), output("b", 20, true), output("b", 5, true)],
	);

	assert_eq!(second.events.len(), 1);
	match &second.events[0] {
		AccountEvent::TransactionChanged { index, transaction } => {
			assert_eq!(*index, 1);
			assert_eq!(transaction.transaction_id, "b");
			assert_eq!(transaction.amount_spendable, 25);
		}
		other => panic!("unexpected event {:?}", other),
	}
}

#[test]
fn spending_an_output_is_reported_as_change() {
	let first = reconcile(&[], false, &[output("a", 10, true), output("a", 4, true)]);

	let second = reconcile(
		&first.transactions,
		true,
		&[output("a", 10, true), output("a", 4, false)],
	);

	assert_eq!(changed_indices(&second.events), vec![0]);
}

#[test]
fn unspendable_only_change_emits_nothing() {
	// Only spendable amounts are compared.
	let first = reconcile(&[], false, &[output("a", 10, true), output("a", 1, false)]);

	let second = reconcile(
		&first.transactions,
		true,
		&[output("a", 10, true), output("a", 9, false)],
	);

	assert_eq!(second.transactions[0].amount_unspendable, 9);
	assert!(second.events.is_empty());
}

#[test]
fn changes_precede_receipts() {
	let first = reconcile(&[], false, &[output("a", 1, true)]);

	let second = reconcile(
		&first.transactions,
		true,
		&[output("a", 2, true), output("b", 3, true)],
	);

	assert!(matches!(
		second.events[0],
		AccountEvent::TransactionChanged { index: 0, .. }
	));
	assert!(matches!(
		second.events[1],
		AccountEvent::TransactionReceived { .. }
	));
}

#[test]
fn shrinking_list_compares_shared_prefix_only() {
	let first = reconcile(
		&[],
		false,
		&[output("a", 1, true), output("b", 2, true), output("c", 3, true)],
	);

	let second = reconcile(
		&first.transactions,
		true,
		&[output("a", 1, true), output("b", 7, true)],
	);

	assert_eq!(second.transactions.len(), 2);
	assert_eq!(changed_indices(&second.events), vec![1]);
	assert!(received_ids(&second.events).is_empty());
}

#[test]
fn first_pass_after_failed_attempt_reports_everything_as_received() {
	// A failed outputs query still counts as a completed pass, so the next pass diffs
	// against an empty list.
	let result = reconcile(&[], true, &[output("a", 1, true), output("b", 2, true)]);

	assert_eq!(received_ids(&result.events), vec!["a", "b"]);
}
