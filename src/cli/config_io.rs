use std::path::PathBuf;

use clap::ArgMatches;

pub const DETAILS: u8 = 0;

/// Configuration of what the cli reads, writes, and prints.
#[derive(Clone)]
pub struct ConfigIO {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub detail: u8,
    pub each_property: bool,
}

impl ConfigIO {
    pub fn from_args(args: &ArgMatches) -> Self {
        let mut the_config = ConfigIO {
            input: PathBuf::default(),
            output_dir: PathBuf::default(),
            detail: DETAILS,
            each_property: false,
        };

        if let Ok(Some(path)) = args.try_get_one::<PathBuf>("input") {
            the_config.input = path.clone()
        };

        if let Ok(Some(path)) = args.try_get_one::<PathBuf>("output_dir") {
            the_config.output_dir = path.clone()
        };

        if let Ok(Some(detail)) = args.try_get_one::<u8>("detail") {
            the_config.detail = *detail
        };

        if let Ok(Some(each)) = args.try_get_one::<bool>("each_property") {
            the_config.each_property = *each
        };

        the_config
    }
}
