use anyhow::Result;

use super::CalendarArgs;
use crate::render::render_calendar;

pub fn run(args: CalendarArgs, json: bool) -> Result<()> {
    let calendar = args.open()?;

    if json {
        println!("{}", serde_json::to_string_pretty(calendar.months())?);
    } else {
        println!("{}", render_calendar(&calendar));
    }

    Ok(())
}
