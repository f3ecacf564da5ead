use std::fmt::{Display, Formatter};

use crate::generated::v1alpha::{template::Format, AccountKey, BalanceInfo, Template};

impl Display for AccountKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let format = match self.format() {
            Format::Unspecified => "unspecified",
            Format::Descriptor => "descriptor",
            Format::Miniscript => "miniscript",
            Format::Ionio => "ionio",
            Format::Raw => "raw",
        };
        write!(f, "{format}({})", self.value)
    }
}

impl BalanceInfo {
    /// Whether the total balance equals the sum of its confirmed and unconfirmed parts.
    pub fn is_consistent(&self) -> bool {
        self.confirmed_balance
            .checked_add(self.unconfirmed_balance)
            .is_some_and(|sum| sum == self.total_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_key_display() {
        let key = AccountKey { id: 7, name: "savings".to_string() };
        assert_eq!(key.to_string(), "savings (#7)");
    }

    #[test]
    fn template_display() {
        let template = Template {
            format: Format::Descriptor as i32,
            value: "wpkh(xpub/0/*)".to_string(),
        };
        assert_eq!(template.to_string(), "descriptor(wpkh(xpub/0/*))");
        assert_eq!(Template::default().format(), Format::Unspecified);
    }

    #[test]
    fn balance_consistency() {
        let balance = BalanceInfo {
            total_balance: 150,
            confirmed_balance: 100,
            unconfirmed_balance: 50,
        };
        assert!(balance.is_consistent());
        assert!(!BalanceInfo { total_balance: 1, ..balance }.is_consistent());
        assert!(!BalanceInfo {
            total_balance: 0,
            confirmed_balance: u64::MAX,
            unconfirmed_balance: 1,
        }
        .is_consistent());
    }
}
