use nestrecipe_lib::Os;
use nestrecipe_lib::consts::{PACKAGE_NAME, PACKAGE_VERSION};

use crate::output::print_stat;

pub fn cmd_info() {
  println!("nestrecipe {}", env!("CARGO_PKG_VERSION"));
  print_stat("Recipe", &format!("{} {}", PACKAGE_NAME, PACKAGE_VERSION));
  match Os::current() {
    Some(os) => print_stat("Host OS", os.as_str()),
    None => print_stat("Host OS", "unknown (pass -s os=<name>)"),
  }
}
