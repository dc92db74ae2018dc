//! Control page markup

use core::fmt::{self, Write};

/// Page title shown in the browser tab and heading
pub const PAGE_TITLE: &str = "Drink Counter";

/// Write the control page with the current count
///
/// The page carries two actions: increment the counter and resynchronize
/// the flaps. Both are plain GET forms so they work without JavaScript.
pub fn write_control_page<W: Write>(w: &mut W, count: u32) -> fmt::Result {
    write!(
        w,
        "<html><head><title>{title}</title>\
         <meta name='viewport' content='width=device-width'></head><body>\
         <h2>{title}</h2>\
         <p>Count: {count}</p>\
         <form action='/inc' method='get'><button type='submit'>+1</button></form>\
         <form action='/sync' method='get'><button type='submit'>Resynchronize</button></form>\
         </body></html>",
        title = PAGE_TITLE,
        count = count,
    )
}
