use apex_core::{AnalysisPoints, Deal, DealRating, FinalReport, ResolvedCompetitor};

use crate::escape::escape_html;
use crate::styles::{meter_tier, score_band, PAGE_CSS};

/// Label used when the client URL cannot be parsed into a hostname.
pub const DEFAULT_CLIENT_LABEL: &str = "Client Report";

/// Derives the document title from the client URL's hostname, stripping a
/// leading `www.`. An unparseable URL falls back to a fixed label instead of
/// failing the render.
#[must_use]
pub fn display_title(client_url: &str) -> String {
    let host = url::Url::parse(client_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_owned()));
    match host {
        Some(host) if !host.is_empty() => format!("Deal Scorecard: {host}"),
        _ => format!("Deal Scorecard: {DEFAULT_CLIENT_LABEL}"),
    }
}

/// Renders the full report document.
///
/// Pure function of its inputs: identical arguments produce an identical
/// document. All images are expected to be embedded already; this never
/// emits a remote reference.
#[must_use]
pub fn render_report(
    final_report: &FinalReport,
    client_info: &serde_json::Value,
    competitors: &[ResolvedCompetitor],
    client_url: &str,
) -> String {
    let mut doc = String::with_capacity(16 * 1024);
    doc.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>");
    doc.push_str(PAGE_CSS);
    doc.push_str("</style></head><body>");

    doc.push_str(&header_html(client_info, client_url));
    doc.push_str(&summary_section_html(competitors));
    doc.push_str(&scorecard_section_html(final_report));
    doc.push_str(&teardown_section_html(final_report, competitors));

    doc.push_str("</body></html>");
    doc
}

fn header_html(client_info: &serde_json::Value, client_url: &str) -> String {
    let mut out = format!("<header><h1>{}</h1>", escape_html(&display_title(client_url)));
    // clientInfo has no fixed schema; a plain string becomes the subtitle,
    // anything else is omitted from the markup.
    if let Some(info) = client_info.as_str() {
        out.push_str(&format!(
            "<p class=\"client-info\">{}</p>",
            escape_html(info)
        ));
    }
    out.push_str(&format!(
        "<p class=\"client-url\">{}</p></header>",
        escape_html(client_url)
    ));
    out
}

fn summary_section_html(competitors: &[ResolvedCompetitor]) -> String {
    let chips: String = competitors
        .iter()
        .map(|r| format!("<span class=\"chip\">{}</span>", escape_html(&r.competitor.name)))
        .collect();
    format!(
        "<section class=\"summary\"><h2>Competitor Summary</h2><div class=\"chips\">{chips}</div></section>"
    )
}

fn scorecard_section_html(final_report: &FinalReport) -> String {
    let rec = &final_report.recommendation;
    let band = score_band(rec.numeric_score);
    let mut out = format!(
        "<section class=\"scorecard\" style=\"border-left-color:{color};\"><h2>Scorecard</h2>\
         <div class=\"overall\"><span class=\"score\" style=\"color:{color};\">{score}/10</span>\
         <span class=\"rating\">{rating}</span></div>\
         <p class=\"summary-text\">{summary}</p>",
        color = band.color,
        score = rec.numeric_score,
        rating = escape_html(&rec.rating),
        summary = escape_html(&rec.summary),
    );
    out.push_str(&scored_subsection_html(
        "Discounts",
        rec.discounts_score,
        &rec.discounts,
    ));
    out.push_str(&scored_subsection_html(
        "Messaging",
        rec.messaging_score,
        &rec.messaging,
    ));
    out.push_str(&scored_subsection_html(
        "Competitiveness",
        rec.competitiveness_score,
        &rec.competitiveness,
    ));
    out.push_str("</section>");
    out
}

fn scored_subsection_html(title: &str, score: f64, points: &AnalysisPoints) -> String {
    let band = score_band(score);
    format!(
        "<div class=\"subscore\"><h3>{title} \
         <span class=\"subscore-value\" style=\"color:{};\">{score}/10</span></h3>{}</div>",
        band.color,
        analysis_points_html(points),
    )
}

/// Renders a good/bad analysis list, or a single placeholder line when both
/// lists are empty. Order within each group is preserved; all `good` entries
/// come before any `bad` entry.
fn analysis_points_html(points: &AnalysisPoints) -> String {
    if points.is_empty() {
        return "<p class=\"analysis-empty\">No analysis points provided.</p>".to_owned();
    }
    let mut out = String::from("<ul class=\"analysis\">");
    for point in &points.good {
        out.push_str(&format!(
            "<li class=\"good\">&#10003; {}</li>",
            escape_html(point)
        ));
    }
    for point in &points.bad {
        out.push_str(&format!(
            "<li class=\"bad\">&#10007; {}</li>",
            escape_html(point)
        ));
    }
    out.push_str("</ul>");
    out
}

fn deal_o_meter_html(rating: DealRating) -> String {
    let tier = meter_tier(rating);
    format!(
        "<div class=\"meter\"><div class=\"meter-track\">\
         <div class=\"meter-fill\" style=\"width:{}%;background:{};\"></div>\
         </div><span class=\"meter-label\">{}</span></div>",
        tier.width_pct, tier.gradient, tier.label,
    )
}

fn deal_item_html(deal: &Deal) -> String {
    let mut out = format!(
        "<li class=\"deal\"><span class=\"deal-name\">{}</span>",
        escape_html(&deal.name)
    );
    if let Some(sale) = deal.sale_price {
        out.push_str(&format!(" <span class=\"sale-price\">${sale:.2}</span>"));
    }
    if let Some(original) = deal.original_price {
        out.push_str(&format!(" <s class=\"original-price\">${original:.2}</s>"));
    }
    // Badge only for a strictly positive discount; 0 or negative means no badge.
    if let Some(pct) = deal.percent_discount {
        if pct > 0.0 {
            out.push_str(&format!(" <span class=\"discount-badge\">{pct}% OFF</span>"));
        }
    }
    out.push_str("</li>");
    out
}

fn teardown_section_html(final_report: &FinalReport, competitors: &[ResolvedCompetitor]) -> String {
    let mut out = String::from("<section class=\"teardown\"><h2>Competitor Teardown</h2>");
    for resolved in competitors {
        // Exact-name match against the comparison entries; competitors the
        // analysis never scored get no card.
        let Some(report) = final_report
            .comparison
            .iter()
            .find(|r| r.competitor_name == resolved.competitor.name)
        else {
            continue;
        };
        out.push_str(&competitor_card_html(resolved, report));
    }
    out.push_str("</section>");
    out
}

fn competitor_card_html(
    resolved: &ResolvedCompetitor,
    report: &apex_core::CompetitorReport,
) -> String {
    let competitor = &resolved.competitor;
    let name = escape_html(&competitor.name);

    let logo = match &resolved.logo_data_url {
        Some(data_url) => format!("<img class=\"logo\" src=\"{data_url}\" alt=\"{name} logo\">"),
        None => "<div class=\"logo-placeholder\">No Logo</div>".to_owned(),
    };

    let deal_type = competitor.deal_type.as_deref().unwrap_or("N/A");
    let deal_duration = competitor.deal_duration.as_deref().unwrap_or("N/A");

    let deals = if competitor.top_deals.is_empty() {
        "<p class=\"no-deals\">No deals listed.</p>".to_owned()
    } else {
        let items: String = competitor.top_deals.iter().map(deal_item_html).collect();
        format!("<ol class=\"deals\">{items}</ol>")
    };

    let creative = match &resolved.creative_data_url {
        Some(data_url) => format!(
            "<div class=\"creative\"><h4>Ad Creative</h4>\
             <img class=\"creative-img\" src=\"{data_url}\" alt=\"{name} ad creative\"></div>"
        ),
        None => String::new(),
    };

    format!(
        "<div class=\"card\"><div class=\"card-header\">{logo}\
         <div><h3>{name}</h3><p class=\"card-url\">{url}</p></div></div>\
         <p class=\"deal-terms\"><strong>Deal:</strong> {deal_type} \
         &middot; <strong>Duration:</strong> {deal_duration}</p>\
         {meter}{analysis}<h4>Top Deals</h4>{deals}{creative}</div>",
        url = escape_html(&competitor.url),
        deal_type = escape_html(deal_type),
        deal_duration = escape_html(deal_duration),
        meter = deal_o_meter_html(report.deal_rating),
        analysis = analysis_points_html(&report.analysis),
    )
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
