use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

use crate::render::html::escape;

// ============================================================
// Mount point IDs
// ============================================================

pub const STAT_CRITICAL: &str = "stat-critical";
pub const STAT_HIGH: &str = "stat-high";
pub const STAT_MEDIUM: &str = "stat-medium";
pub const STAT_LOW: &str = "stat-low";
pub const DASHBOARD_TRANSACTIONS_BODY: &str = "dashboard-transactions-body";
pub const ALL_TRANSACTIONS_BODY: &str = "all-transactions-body";
pub const TX_SEARCH: &str = "tx-search";
pub const ALERTS_CONTAINER: &str = "alerts-container";
pub const RISK_TREND_CANVAS: &str = "riskTrendChart";
pub const LOCATION_CANVAS: &str = "locationChart";
pub const CATEGORY_CANVAS: &str = "vendorChart";
pub const SETTING_REFRESH: &str = "setting-refresh";
pub const SETTING_THEME: &str = "setting-theme";

/// Counter element for a severity level, if the level has one.
pub fn stat_element(level: &str) -> Option<&'static str> {
    match level {
        "CRITICAL" => Some(STAT_CRITICAL),
        "HIGH" => Some(STAT_HIGH),
        "MEDIUM" => Some(STAT_MEDIUM),
        "LOW" => Some(STAT_LOW),
        _ => None,
    }
}

/// What a mount point holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(String),
    Html(String),
    Input(String),
    Checkbox(bool),
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A transient toast message.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

const MAX_NOTIFICATIONS: usize = 20;

/// The set of mount points the views write into. Elements are created by the
/// page owner; views only write into elements that already exist.
#[derive(Debug, Default)]
pub struct Page {
    elements: BTreeMap<String, Element>,
    notifications: VecDeque<Notification>,
}

impl Page {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A page with every mount point the dashboard binds to.
    pub fn dashboard(auto_refresh: bool) -> Self {
        let mut page = Self::empty();
        for id in [STAT_CRITICAL, STAT_HIGH, STAT_MEDIUM, STAT_LOW] {
            page.mount(id, Element::Text("0".to_string()));
        }
        for id in [DASHBOARD_TRANSACTIONS_BODY, ALL_TRANSACTIONS_BODY, ALERTS_CONTAINER] {
            page.mount(id, Element::Html(String::new()));
        }
        for id in [RISK_TREND_CANVAS, LOCATION_CANVAS, CATEGORY_CANVAS] {
            page.mount(id, Element::Canvas);
        }
        page.mount(TX_SEARCH, Element::Input(String::new()));
        page.mount(SETTING_REFRESH, Element::Checkbox(auto_refresh));
        page.mount(SETTING_THEME, Element::Checkbox(false));
        page
    }

    pub fn mount(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    pub fn unmount(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// True only for a mounted canvas; other kinds under the id do not count.
    pub fn is_canvas(&self, id: &str) -> bool {
        matches!(self.elements.get(id), Some(Element::Canvas))
    }

    /// Replace the text of a text element. Returns false if it is not mounted.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Text(current)) => {
                *current = text.into();
                true
            }
            _ => false,
        }
    }

    /// Replace the markup of a container. Returns false if it is not mounted.
    pub fn set_html(&mut self, id: &str, html: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Html(current)) => {
                *current = html.into();
                true
            }
            _ => false,
        }
    }

    pub fn input_value(&self, id: &str) -> Option<&str> {
        match self.elements.get(id) {
            Some(Element::Input(value)) => Some(value),
            _ => None,
        }
    }

    pub fn set_input(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Input(current)) => {
                *current = value.into();
                true
            }
            _ => false,
        }
    }

    pub fn checkbox(&self, id: &str) -> Option<bool> {
        match self.elements.get(id) {
            Some(Element::Checkbox(checked)) => Some(*checked),
            _ => None,
        }
    }

    pub fn set_checkbox(&mut self, id: &str, checked: bool) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Checkbox(current)) => {
                *current = checked;
                true
            }
            _ => false,
        }
    }

    /// Text or markup content of a mount point.
    pub fn content(&self, id: &str) -> Option<&str> {
        match self.elements.get(id) {
            Some(Element::Text(s)) | Some(Element::Html(s)) | Some(Element::Input(s)) => Some(s),
            _ => None,
        }
    }

    /// Auto-refresh toggle. An absent checkbox counts as enabled.
    pub fn auto_refresh_enabled(&self) -> bool {
        self.checkbox(SETTING_REFRESH).unwrap_or(true)
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        if self.notifications.len() == MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Notification {
            level,
            message: message.into(),
        });
    }

    /// Take all pending notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Serialize every mount point into a standalone HTML document.
    pub fn render_document(&self) -> String {
        let dark = self.checkbox(SETTING_THEME).unwrap_or(false);
        let mut out = String::from("<!DOCTYPE html>\n<html>\n");
        out.push_str(if dark {
            "<body class=\"theme-dark\">\n"
        } else {
            "<body>\n"
        });
        for (id, element) in &self.elements {
            let fragment = match element {
                Element::Text(text) => format!("<span id=\"{}\">{}</span>", id, escape(text)),
                Element::Html(html) if id.ends_with("-body") => {
                    format!("<table><tbody id=\"{}\">{}</tbody></table>", id, html)
                }
                Element::Html(html) => format!("<div id=\"{}\">{}</div>", id, html),
                Element::Input(value) => format!(
                    "<input id=\"{}\" type=\"search\" value=\"{}\">",
                    id,
                    escape(value)
                ),
                Element::Checkbox(checked) => format!(
                    "<input id=\"{}\" type=\"checkbox\"{}>",
                    id,
                    if *checked { " checked" } else { "" }
                ),
                Element::Canvas => format!("<canvas id=\"{}\"></canvas>", id),
            };
            out.push_str(&fragment);
            out.push('\n');
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}
