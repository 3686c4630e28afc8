//! Rendering of lookup results as Slack markup.

use std::fmt::Write;

use crate::base::types::{AssetStatus, AssetSummary, Lookup, LookupError, LookupKind, LookupResult};

/// Render the reply for a lookup of `term`.
pub fn format_lookup(kind: LookupKind, term: &str, result: &LookupResult) -> String {
    match result {
        Ok(Lookup::NotFound) => format!("Sorry, couldn't find anything for {kind} `{term}`."),
        Ok(Lookup::UserAssets { user_name, total, assets }) => {
            let mut response = format!("Returned *{total}* results for {user_name}.\n");

            for asset in assets {
                response.push_str(&user_asset_block(asset));
            }

            response
        }
        Ok(Lookup::BySerial(assets)) => assets.iter().map(serial_block).collect::<Vec<_>>().join("\n\n"),
        Ok(Lookup::ByTag(asset)) => tag_block(asset),
        Err(LookupError::Timeout { .. }) => format!("Sorry, the lookup for {kind} `{term}` timed out. Please try again later."),
        Err(err) => format!("Sorry, the lookup for {kind} `{term}` failed: {err}."),
    }
}

fn user_asset_block(asset: &AssetSummary) -> String {
    let mut block = String::new();

    let _ = writeln!(block);
    let _ = writeln!(block, "*Model:* {}", asset.model_name);
    let _ = writeln!(block, "*Serial Number:* `{}`", asset.serial);
    let _ = writeln!(block, "*Asset Tag:* `{}`", asset.asset_tag);
    let _ = writeln!(block, ":link: _Link to asset:_ {}", asset.link);
    let _ = writeln!(block, ":arrow_right: _Click here to checkin_ {}/checkin", asset.link);

    block
}

fn serial_block(asset: &AssetSummary) -> String {
    format!("*Model:* {}\n*Asset Tag:* `{}`{}", asset.model_name, asset.asset_tag, status_block(asset))
}

fn tag_block(asset: &AssetSummary) -> String {
    format!("*Model:* {}\n*Serial Number:* `{}`{}", asset.model_name, asset.serial, status_block(asset))
}

/// Status line plus action links; empty for statuses without an action.
fn status_block(asset: &AssetSummary) -> String {
    let link = &asset.link;

    match &asset.status {
        AssetStatus::Deployed => format!(
            "\n*Status:* Checked out to `{}`\n:link: _Link to asset:_ {link}\n:arrow_right: _Click here to checkin:_ {link}/checkin",
            asset.assigned_to_name.as_deref().unwrap_or_default()
        ),
        AssetStatus::Deployable => format!("\n*Status:* Deployable.\n:link: _Link to asset:_ {link}\n:arrow_right: _Click here to checkout:_ {link}/checkout"),
        AssetStatus::Other(_) => String::new(),
    }
}
