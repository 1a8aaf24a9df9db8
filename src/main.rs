// SPDX-License-Identifier: MPL-2.0

use driftline::app::{self, paths, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let data_dir = args.opt_value_from_str("--data-dir").unwrap_or(None);
    let config_dir = args.opt_value_from_str("--config-dir").unwrap_or(None);
    paths::init_cli_overrides(data_dir, config_dir);

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap_or(None),
        api_url: args.opt_value_from_str("--api-url").unwrap_or(None),
    };

    app::run(flags)
}
