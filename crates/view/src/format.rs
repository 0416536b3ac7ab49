use shopcart_core::Money;

/// Render an amount for display: `$15` for whole amounts, `$15.50` otherwise.
pub fn format_money(money: Money) -> String {
    let symbol = money.currency().symbol();
    if money.minor_part() == 0 {
        format!("{symbol}{}", money.major_part())
    } else {
        format!("{symbol}{}.{:02}", money.major_part(), money.minor_part())
    }
}
