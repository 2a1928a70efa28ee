//! Generic extraction pipeline: match → filter → refine → dedupe.
//!
//! Every language goes through the same steps; only the profile differs.

use tracing::debug;

use crate::common::{ends_with_member_access, split_top_level, text_before};
use crate::dedupe::dedupe;
use crate::profile::{LanguageProfile, SourceContext};
use crate::record::{CallableRecord, Candidate};

/// How far back the member-access check looks.
const CALL_SITE_WINDOW: usize = 100;

/// Runs every rule of `profile` over `content` and returns all raw hits,
/// rule by rule, in file order within a rule.
pub fn collect_candidates(profile: &dyn LanguageProfile, content: &str) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(64);

    for rule in profile.rules() {
        let before = candidates.len();
        for caps in rule.regex.captures_iter(content) {
            let (Some(whole), Some(name), Some(params)) =
                (caps.get(0), caps.name("name"), caps.name("params"))
            else {
                continue;
            };
            candidates.push(Candidate {
                name: name.as_str().to_string(),
                category: rule.category,
                params: params.as_str().trim().to_string(),
                return_type: caps.name("ret").map(|m| m.as_str().trim().to_string()),
                start: whole.start(),
                name_start: name.start(),
                text: whole.as_str().to_string(),
            });
        }
        debug!(
            language = %profile.language(),
            category = %rule.category,
            hits = candidates.len() - before,
            "rule applied"
        );
    }
    candidates
}

/// Checks shared by every language: keywords and `obj.name(` call sites.
fn is_false_positive(
    profile: &dyn LanguageProfile,
    ctx: &SourceContext<'_>,
    cand: &Candidate,
) -> bool {
    if profile.is_keyword(&cand.name, cand.category) {
        return true;
    }
    let before = text_before(ctx.content, cand.start, CALL_SITE_WINDOW);
    ends_with_member_access(before) || profile.rejects(ctx, cand)
}

/// Extracts the deduplicated callables of one source text.
///
/// `file` is copied into every record as given.
pub fn extract_callables(
    profile: &dyn LanguageProfile,
    file: &str,
    content: &str,
) -> Vec<CallableRecord> {
    let ctx = SourceContext::new(profile, content);
    let mut records = Vec::new();

    for cand in collect_candidates(profile, content) {
        if is_false_positive(profile, &ctx, &cand) {
            debug!(name = %cand.name, category = %cand.category, "rejected candidate");
            continue;
        }
        let Some(refined) = profile.refine(&ctx, &cand) else {
            continue;
        };

        let parameters = split_top_level(&cand.params)
            .iter()
            .map(|seg| profile.normalize_param(seg))
            .filter(|p| !p.is_empty())
            .collect();

        records.push(CallableRecord {
            line: ctx.lines.line_of(cand.start),
            name: cand.name,
            category: cand.category,
            return_type: refined.return_type,
            parameters,
            modifiers: refined.modifiers,
            owning_type: refined.owning_type,
            file: file.to_string(),
        });
    }

    dedupe(records, |c| profile.priority(c))
}
