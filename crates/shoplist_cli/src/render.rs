//! Text rendering of the two-column list view.

use shoplist_core::{Item, ListView};
use std::io::{self, Write};

/// Writes the to-buy and in-cart sections, or an empty-list notice.
pub fn render_view(out: &mut impl Write, view: &ListView) -> io::Result<()> {
    if view.is_empty() {
        return writeln!(out, "Your list is empty!");
    }

    writeln!(out, "To buy ({})", view.to_buy_count())?;
    for item in &view.to_buy {
        writeln!(out, "  [ ] {}", item.name)?;
    }

    writeln!(out, "In cart ({})", view.in_cart_count())?;
    for item in &view.in_cart {
        writeln!(out, "  [x] {}", struck(item))?;
    }
    Ok(())
}

fn struck(item: &Item) -> String {
    format!("~{}~", item.name)
}
