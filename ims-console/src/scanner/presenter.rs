//! Text rendering of the resolver outcome

use std::fmt;

use shared::models::Resource;

use super::resolver::ResolverState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResultView {
    Idle,
    Loading { code: String },
    Found { fields: Vec<(&'static str, String)> },
    Failed { message: String },
}

fn resource_fields(r: &Resource) -> Vec<(&'static str, String)> {
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    vec![
        ("Resource ID", r.resource_id.clone()),
        ("Brand", r.brand.clone()),
        ("Model", r.model.clone()),
        ("Specification", r.specification.clone()),
        ("Type", r.resource_type.clone()),
        ("Class", r.resource_class.clone()),
        ("Status", r.resource_status.clone()),
        ("Serial Number", r.serial_number.clone()),
        ("Unit Price", r.unit_price.to_string()),
        ("Purchase Date", r.purchase_date.to_string()),
        ("Warranty Expiry", or_dash(r.warranty_expiry_date.map(|d| d.to_string()))),
        ("Remarks", or_dash(r.remarks.clone())),
        ("Batch", or_dash(r.batch_id.clone())),
    ]
}

impl From<&ResolverState> for ScanResultView {
    fn from(state: &ResolverState) -> Self {
        if state.loading {
            return ScanResultView::Loading {
                code: state.code.clone().unwrap_or_default(),
            };
        }
        if let Some(message) = &state.error {
            return ScanResultView::Failed {
                message: message.clone(),
            };
        }
        match &state.resource {
            Some(resource) => ScanResultView::Found {
                fields: resource_fields(resource),
            },
            None => ScanResultView::Idle,
        }
    }
}

impl fmt::Display for ScanResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanResultView::Idle => f.write_str("Point the camera at a barcode"),
            ScanResultView::Loading { code } => write!(f, "Looking up {}...", code),
            ScanResultView::Failed { message } => write!(f, "Error: {}", message),
            ScanResultView::Found { fields } => {
                for (i, (label, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}: {}", label, value)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_wins_over_stale_resource() {
        let state = ResolverState {
            error: Some("failed to fetch resource or unauthorized".into()),
            ..Default::default()
        };
        let view = ScanResultView::from(&state);
        assert_eq!(view.to_string(), "Error: failed to fetch resource or unauthorized");
    }

    #[test]
    fn test_idle_and_loading() {
        assert_eq!(ScanResultView::from(&ResolverState::default()), ScanResultView::Idle);

        let loading = ResolverState {
            code: Some("RES-1".into()),
            loading: true,
            ..Default::default()
        };
        assert_eq!(loading_text(&loading), "Looking up RES-1...");
    }

    fn loading_text(state: &ResolverState) -> String {
        ScanResultView::from(state).to_string()
    }
}
