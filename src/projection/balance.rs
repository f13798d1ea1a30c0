use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{admits_account, Account, AccountClassification};

/// Active asset balances minus the absolute total of active liability balances,
/// restricted to the optional account filter.
pub fn starting_balance(accounts: &[Account], account_ids: Option<&[Uuid]>) -> Decimal {
    let total_for = |classification: AccountClassification| -> Decimal {
        accounts
            .iter()
            .filter(|account| account.is_active())
            .filter(|account| account.classification == classification)
            .filter(|account| admits_account(account_ids, account.id))
            .map(|account| account.balance)
            .sum()
    };
    total_for(AccountClassification::Asset) - total_for(AccountClassification::Liability).abs()
}
