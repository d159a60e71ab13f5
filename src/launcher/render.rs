//! Box-drawing layout for the menu.
//!
//! Every row is [`BOX_WIDTH`] columns wide as long as labels fit. Longer
//! labels are neither wrapped nor cut; the right border is simply pushed out.

use unicode_width::UnicodeWidthStr;

use crate::config::{Color, Menu, MenuItem, Title};

pub const BOX_WIDTH: usize = 54;
const INNER_WIDTH: usize = BOX_WIDTH - 2;

const RESET: &str = "\x1b[0m";

pub fn color_code(color: &Color) -> &'static str {
    match color {
        Color::Black => "30",
        Color::Red => "31",
        Color::Green => "32",
        Color::Yellow => "33",
        Color::Blue => "34",
        Color::Magenta => "35",
        Color::Cyan => "36",
        Color::White => "37",
        Color::Default(_) => "0",
    }
}

pub fn colorize(color: &Color, text: &str) -> String {
    format!("\x1b[{}m{text}{RESET}", color_code(color))
}

pub fn render_menu(menu: &Menu) -> String {
    let mut out = String::new();
    push_border(&mut out, '╔', '═', '╗');
    push_title(&mut out, &menu.title);
    push_border(&mut out, '╟', '─', '╢');
    for (i, item) in menu.items.iter().enumerate() {
        push_item(&mut out, i + 1, item);
        if i + 1 < menu.items.len() {
            push_border(&mut out, '╟', '─', '╢');
        }
    }
    push_border(&mut out, '╚', '═', '╝');
    out
}

pub fn prompt(item_count: usize) -> String {
    format!("Select an option (1 - {item_count}, or q to quit): ")
}

fn push_border(out: &mut String, left: char, fill: char, right: char) {
    out.push(left);
    out.extend(std::iter::repeat(fill).take(INNER_WIDTH));
    out.push(right);
    out.push('\n');
}

fn push_title(out: &mut String, title: &Title) {
    let width = title.label.width();
    let left = ((INNER_WIDTH - 1).saturating_sub(width) / 2).max(1);
    let right = INNER_WIDTH.saturating_sub(left + width).max(1);

    out.push('║');
    push_spaces(out, left);
    out.push_str(&colorize(&title.color, &title.label));
    push_spaces(out, right);
    out.push_str("║\n");
}

fn push_item(out: &mut String, number: usize, item: &MenuItem) {
    let prefix = format!("╟─── {number}. ");
    let used = prefix.width() + item.label.width();
    let pad = (BOX_WIDTH - 1).saturating_sub(used).max(1);

    out.push_str(&prefix);
    out.push_str(&colorize(&item.color, &item.label));
    push_spaces(out, pad);
    out.push_str("║\n");
}

fn push_spaces(out: &mut String, n: usize) {
    out.extend(std::iter::repeat(' ').take(n));
}
