use crate::config::{Color, CONFIG_ENV, DEFAULT_CONFIG_FILE, MAX_ITEMS};

pub fn usage() -> String {
    let colors = Color::NAMED
        .iter()
        .map(|c| format!("  - {c}\n"))
        .collect::<String>();

    format!(
        r#"Usage:
  menu -create       : Create an example {DEFAULT_CONFIG_FILE}
  menu -file <path>  : Specify a custom config file path (default: ${CONFIG_ENV} or {DEFAULT_CONFIG_FILE})
  menu -log <path>   : Append diagnostic logs to <path>
  menu -help         : Display usage instructions

Color Options:
  Colors can be specified in the JSON file using the 'color' field for the title and each menu item.
  Available color options are:
{colors}  Any other value is shown without color.

Menu Item Limit:
  The maximum limit for menu items is {MAX_ITEMS}.
  If the menu exceeds this limit, a message will be displayed.

Commands:
  Each item's 'command' is run with `bash -c`, so pipes, redirects and `&&` work.
  Only use config files you trust.

Example JSON usage:
  {{
    "title": {{
      "label": "My Menu",
      "color": "blue"
    }},
    "items": [
      {{
        "label": "Option 1",
        "command": "ls -lha",
        "color": "green"
      }}
    ]
  }}
"#
    )
}
