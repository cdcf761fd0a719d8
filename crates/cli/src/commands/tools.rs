use anyhow::Result;
use freshboard_core::{freshness_score, is_in_range, FreshnessBand};

pub(crate) fn hash_password(password: &str, cost: u32) -> Result<()> {
    let hash = freshboard_service::hash_password(password, cost)?;
    println!("{hash}");
    Ok(())
}

pub(crate) fn score(measured: f64, ideal: f64) -> Result<()> {
    let freshness = freshness_score(Some(measured), Some(ideal));
    let band = FreshnessBand::for_score(f64::from(freshness));
    let out = serde_json::json!({
        "measured_temp": measured,
        "ideal_temp": ideal,
        "freshness": freshness,
        "in_range": is_in_range(Some(measured), Some(ideal)),
        "band": band,
        "color": band.color(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
