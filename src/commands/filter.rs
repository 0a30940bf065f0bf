use crate::{
    libs::{
        filter::Filter,
        messages::Message,
        preferences::{FilePreferences, FilterPreference},
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Filter to activate; prints the active one when omitted
    #[arg(value_enum)]
    filter: Option<Filter>,
}

pub fn cmd(args: FilterArgs) -> Result<()> {
    let preferences = FilterPreference::new(FilePreferences::new()?);

    match args.filter {
        Some(filter) => {
            preferences.save_filter(filter);
            msg_success!(Message::FilterSaved(filter));
        }
        None => msg_info!(Message::FilterActive(preferences.load_filter())),
    }
    Ok(())
}
