use crate::cli::resolve_month;
use crate::error::Result;
use crate::fmt::money;
use crate::month;
use crate::storage::{Storage, TargetStore};

pub fn show(month_arg: Option<String>) -> Result<()> {
    let month = resolve_month(month_arg.as_deref())?;
    let targets = TargetStore::load(Storage::open_default());
    let target = targets.get(&month);
    let origin = if targets.is_set(&month) { "" } else { "  (defaults)" };

    println!("{}{origin}", month::label(&month));
    println!("ASP target:  {}", money(target.asp));
    println!("Sales goal:  {}", money(target.goal));
    Ok(())
}

/// Update a month's targets. Values not passed keep what the month already
/// resolves to, so setting one side never clobbers the other.
pub fn set(month_arg: Option<String>, asp: Option<f64>, goal: Option<f64>) -> Result<()> {
    let month = resolve_month(month_arg.as_deref())?;
    let mut targets = TargetStore::load(Storage::open_default());

    let mut target = targets.get(&month);
    if let Some(asp) = asp {
        target.asp = asp;
    }
    if let Some(goal) = goal {
        target.goal = goal;
    }
    targets.set(&month, target)?;

    println!(
        "Targets for {}: ASP {}, goal {}",
        month::label(&month),
        money(target.asp),
        money(target.goal),
    );
    Ok(())
}
