use askama::Template;

use super::PageContext;
use crate::audit::AuditEntry;

#[derive(Template)]
#[template(path = "audit/list.html")]
pub struct AuditListTemplate {
    pub ctx: PageContext,
    pub entries: Vec<AuditEntry>,
}
