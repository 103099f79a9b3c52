//! Keeping a question's nets consistent with its options.
//!
//! All edits are pure: they take the current nets and return a new list,
//! re-synced against the question's valid option codes.

use crosstab_core::{CodesNet, Net};

use crate::error::{NetError, NetResult};

/// Re-check one net against the valid option codes.
///
/// A codes net keeps only codes that are still valid and is discarded when
/// none remain. A range net is discarded when its bounds are not finite or
/// are inverted.
pub fn sync_net(net: &Net, valid_codes: &[String]) -> Option<Net> {
    match net {
        Net::Codes(n) => {
            let mut kept: Vec<String> = Vec::with_capacity(n.codes.len());
            for code in &n.codes {
                if valid_codes.contains(code) && !kept.contains(code) {
                    kept.push(code.clone());
                }
            }
            if kept.is_empty() {
                log::debug!("Dropping codes net {:?}: no valid codes remain", n.label);
                return None;
            }
            Some(Net::Codes(CodesNet {
                label: n.label.clone(),
                codes: kept,
            }))
        }
        Net::Range(n) => {
            if n.is_well_formed() {
                Some(net.clone())
            } else {
                log::debug!("Dropping malformed range net {:?}", n.label);
                None
            }
        }
    }
}

/// Sync every net, dropping the ones that no longer apply
pub fn sync_nets(nets: &[Net], valid_codes: &[String]) -> Vec<Net> {
    nets.iter()
        .filter_map(|n| sync_net(n, valid_codes))
        .collect()
}

/// Append a net and re-sync
pub fn add_net(nets: &[Net], net: Net, valid_codes: &[String]) -> Vec<Net> {
    let mut updated = nets.to_vec();
    updated.push(net);
    sync_nets(&updated, valid_codes)
}

/// Replace the net at `index` and re-sync
pub fn update_net(nets: &[Net], index: usize, net: Net, valid_codes: &[String]) -> NetResult<Vec<Net>> {
    check_index(nets, index)?;
    let mut updated = nets.to_vec();
    updated[index] = net;
    Ok(sync_nets(&updated, valid_codes))
}

/// Remove the net at `index` and re-sync
pub fn delete_net(nets: &[Net], index: usize, valid_codes: &[String]) -> NetResult<Vec<Net>> {
    check_index(nets, index)?;
    let mut updated = nets.to_vec();
    updated.remove(index);
    Ok(sync_nets(&updated, valid_codes))
}

fn check_index(nets: &[Net], index: usize) -> NetResult<()> {
    if index >= nets.len() {
        return Err(NetError::IndexOutOfBounds {
            index,
            len: nets.len(),
        });
    }
    Ok(())
}
