use crate::cli::output::Output;
use crate::cli::ConfigAction;
use crate::config::{preference, DefaultAction};
use crate::errors::Result;

/// Inspect or change the persisted default Enter action.
pub async fn run(action: ConfigAction) -> Result<()> {
    let path = crate::config::settings_path()?;

    match action {
        ConfigAction::Get => match preference::load(&path) {
            Some(action) => println!("{action}"),
            None => Output::info("No default action configured (set one with 'sta config set')."),
        },
        ConfigAction::Set { value } => {
            let action: DefaultAction = value.parse()?;
            preference::save(&path, action)?;
            Output::success(format!("Default action set to '{action}'"));
        }
        ConfigAction::Unset => {
            preference::unset(&path)?;
            Output::success("Default action cleared");
        }
    }

    Ok(())
}
