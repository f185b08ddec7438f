use crate::gateway::types::Transaction;
use crate::projector;

pub const EMPTY_ALERTS: &str =
    "<div class=\"empty-state\">No active high-priority alerts. Good job! ✅</div>";

const TABLE_COLUMNS: usize = 9;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format an amount as INR with Indian digit grouping, e.g. `₹1,23,456.78`.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("₹{}", amount);
    }

    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = (paise / 100).to_string();
    let fraction = paise % 100;

    // Last three digits form one group, everything before groups in pairs.
    let grouped = if rupees.len() > 3 {
        let (head, tail) = rupees.split_at(rupees.len() - 3);
        let mut out = String::new();
        for (i, c) in head.chars().enumerate() {
            if i > 0 && (head.len() - i) % 2 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out.push(',');
        out.push_str(tail);
        out
    } else {
        rupees
    };

    let sign = if amount < 0.0 && paise > 0 { "-" } else { "" };
    format!("{}₹{}.{:02}", sign, grouped, fraction)
}

/// Round half up, matching how scores are shown on the dashboard.
pub fn display_score(score: f64) -> i64 {
    (score + 0.5).floor() as i64
}

pub fn tx_row(tx: &Transaction) -> String {
    format!(
        "<tr>\
         <td>#{id}</td>\
         <td>{timestamp}</td>\
         <td>{amount}</td>\
         <td>{score}</td>\
         <td><span class=\"badge {badge}\">{level}</span></td>\
         <td>{reason}</td>\
         <td>{location}</td>\
         <td>{category}</td>\
         <td><input type=\"checkbox\"{checked} disabled></td>\
         </tr>",
        id = escape(&tx.id.to_string()),
        timestamp = escape(&tx.timestamp),
        amount = format_inr(tx.amount),
        score = display_score(tx.score),
        badge = projector::badge_class(tx),
        level = escape(projector::level_label(tx)),
        reason = escape(projector::reason_text(tx)),
        location = escape(projector::location_label(tx)),
        category = escape(projector::category_cell(tx)),
        checked = if tx.reviewed { " checked" } else { "" },
    )
}

pub fn info_row(message: &str) -> String {
    format!(
        "<tr class=\"info-row\"><td colspan=\"{}\">{}</td></tr>",
        TABLE_COLUMNS,
        escape(message)
    )
}

pub fn table_body<'a>(rows: impl IntoIterator<Item = &'a Transaction>) -> String {
    let mut out = String::new();
    for tx in rows {
        out.push_str(&tx_row(tx));
    }
    out
}

pub fn alert_card(tx: &Transaction) -> String {
    format!(
        "<div class=\"alert-card\">\
         <div class=\"alert-icon\">⚠️</div>\
         <div class=\"alert-content\">\
         <h4>Suspicious Activity (#{id})</h4>\
         <p><strong>Reason:</strong> {reason}</p>\
         <p><small>{timestamp} • {location}</small></p>\
         </div>\
         <div class=\"alert-actions\">\
         <button class=\"btn-primary\" data-action=\"investigate\" data-tx=\"{id}\">Investigate</button>\
         <button class=\"btn-secondary\" data-action=\"dismiss\" data-tx=\"{id}\">Dismiss</button>\
         </div>\
         </div>",
        id = escape(&tx.id.to_string()),
        reason = escape(projector::reason_text(tx)),
        timestamp = escape(&tx.timestamp),
        location = escape(projector::location_label(tx)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::types::sample_tx;

    #[test]
    fn test_format_inr_uses_indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(999.5), "₹999.50");
        assert_eq!(format_inr(1000.0), "₹1,000.00");
        assert_eq!(format_inr(123456.789), "₹1,23,456.79");
        assert_eq!(format_inr(12345678.0), "₹1,23,45,678.00");
        assert_eq!(format_inr(-1500.25), "-₹1,500.25");
    }

    #[test]
    fn test_display_score_rounds_half_up() {
        assert_eq!(display_score(84.5), 85);
        assert_eq!(display_score(84.49), 84);
        assert_eq!(display_score(-0.5), 0);
    }

    #[test]
    fn test_row_uses_fallbacks_and_escapes() {
        let mut tx = sample_tx(9, 91.2, None, None);
        tx.reason = Some("<script>alert(1)</script>".to_string());
        let row = tx_row(&tx);
        assert!(row.contains("<td>#9</td>"));
        assert!(row.contains("<td>91</td>"));
        assert!(row.contains("<span class=\"badge badge-critical\">CRITICAL</span>"));
        assert!(row.contains("<td>Unknown</td>"));
        assert!(row.contains("<td>N/A</td>"));
        assert!(row.contains("&lt;script&gt;"));
        assert!(!row.contains("<script>"));
        assert!(!row.contains(" checked"));
    }

    #[test]
    fn test_alert_card_carries_id_and_location() {
        let tx = sample_tx(31, 88.0, Some("Berlin"), None);
        let card = alert_card(&tx);
        assert!(card.contains("Suspicious Activity (#31)"));
        assert!(card.contains("2023-10-27 18:00:00 • Berlin"));
        assert!(card.contains("data-tx=\"31\""));
    }
}
