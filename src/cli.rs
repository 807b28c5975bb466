//! Command bodies for the `atlas` binary.
//!
//! Each command returns the rendered text instead of printing, so the
//! outcome of every call is testable against an in-memory source. Every
//! command resolves to exactly one of: an error, a "not found" message,
//! or populated content.

use log::info;

use crate::countries::types::CountryRow;
use crate::countries::{CountrySource, NormalizedCountry, RepositoryError, filter};

/// Fetches and renders the full country list in upstream order.
pub async fn list(source: &dyn CountrySource) -> Result<String, RepositoryError> {
    let countries = source.fetch_all().await?;
    let rows: Vec<CountryRow> = countries.iter().map(CountryRow::from).collect();
    Ok(render_rows(&rows))
}

/// Fetches the list and narrows it by a case-insensitive name query.
pub async fn search(
    source: &dyn CountrySource,
    query: &str,
) -> Result<String, RepositoryError> {
    let countries = source.fetch_all().await?;
    let matched = filter(&countries, query);
    info!("Query {query:?} matched {} of {}", matched.len(), countries.len());
    if matched.is_empty() {
        return Ok(format!("No countries match \"{query}\"."));
    }
    let rows: Vec<CountryRow> = matched.into_iter().map(CountryRow::from).collect();
    Ok(render_rows(&rows))
}

/// Looks up one country by exact name and renders its detail view.
///
/// The name may arrive percent-encoded (it is a routing parameter in the
/// original flow); it is decoded before the lookup.
pub async fn show(source: &dyn CountrySource, name: &str) -> Result<String, RepositoryError> {
    let name = urlencoding::decode(name)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| name.to_string());

    match source.fetch_by_name(&name).await? {
        Some(country) => Ok(render_detail(&country)),
        None => Ok(format!("No country found matching \"{name}\".")),
    }
}

fn render_rows(rows: &[CountryRow]) -> String {
    let mut out = format!("{} countries\n", rows.len());
    for row in rows {
        out.push_str(&format!("  {} [{}]  {}\n", row.name, row.key, row.flag));
    }
    out
}

fn render_detail(c: &NormalizedCountry) -> String {
    let currency = c
        .currencies
        .values()
        .next()
        .map(String::as_str)
        .unwrap_or("N/A");
    let languages = if c.languages.is_empty() {
        "N/A".to_string()
    } else {
        c.languages.values().cloned().collect::<Vec<_>>().join(", ")
    };

    format!(
        "{name}\n\
         Capital: {capital}\n\
         Population: {population}\n\
         Region: {region}\n\
         Subregion: {subregion}\n\
         Continent: {continent}\n\
         Country Code: {code}\n\
         Currency: {currency}\n\
         Languages: {languages}\n\
         Leader: {leader}\n\
         Flag: {flag}\n",
        name = c.common_name,
        capital = c.capitals.join(", "),
        population = format_population(c.population),
        region = c.region,
        subregion = c.subregion,
        continent = c.continents.join(", "),
        code = c.code,
        currency = currency,
        languages = languages,
        leader = c.government.leader,
        flag = c.flag_url,
    )
}

/// Groups digits in threes: 16644701 → "16,644,701".
fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingSource, StaticSource, country};

    #[tokio::test]
    async fn test_list_renders_all_rows_in_order() {
        let source = StaticSource(vec![
            country("Canada", "CAN"),
            country("Chad", "TCD"),
            country("France", "FRA"),
        ]);
        let out = list(&source).await.unwrap();
        assert!(out.starts_with("3 countries\n"));
        let canada = out.find("Canada").unwrap();
        let chad = out.find("Chad").unwrap();
        let france = out.find("France").unwrap();
        assert!(canada < chad && chad < france);
    }

    #[tokio::test]
    async fn test_search_narrows_by_query() {
        let source = StaticSource(vec![
            country("Canada", "CAN"),
            country("Chad", "TCD"),
            country("France", "FRA"),
        ]);
        let out = search(&source, "ch").await.unwrap();
        assert!(out.contains("Chad"));
        assert!(!out.contains("Canada"));
        assert!(!out.contains("France"));
    }

    #[tokio::test]
    async fn test_search_with_no_match_is_not_an_error() {
        let source = StaticSource(vec![country("Chad", "TCD")]);
        let out = search(&source, "xyz").await.unwrap();
        assert_eq!(out, "No countries match \"xyz\".");
    }

    #[tokio::test]
    async fn test_show_renders_defaults_for_sparse_record() {
        let source = StaticSource(vec![country("Wonderland", "WLD")]);
        let out = show(&source, "Wonderland").await.unwrap();
        assert!(out.starts_with("Wonderland\n"));
        assert!(out.contains("Capital: N/A\n"));
        assert!(out.contains("Population: 0\n"));
        assert!(out.contains("Region: Unknown\n"));
        assert!(out.contains("Country Code: WLD\n"));
        assert!(out.contains("Currency: N/A\n"));
        assert!(out.contains("Languages: N/A\n"));
        assert!(out.contains("Leader: N/A\n"));
    }

    #[tokio::test]
    async fn test_show_decodes_routing_parameter() {
        let source = StaticSource(vec![country("Côte d'Ivoire", "CIV")]);
        let out = show(&source, "C%C3%B4te%20d%27Ivoire").await.unwrap();
        assert!(out.starts_with("Côte d'Ivoire\n"));
    }

    #[tokio::test]
    async fn test_show_miss_is_distinct_from_failure() {
        let source = StaticSource(vec![country("Chad", "TCD")]);
        let out = show(&source, "Narnia").await.unwrap();
        assert_eq!(out, "No country found matching \"Narnia\".");

        let failing = FailingSource;
        let err = show(&failing, "Chad").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Network(_)));
    }

    #[tokio::test]
    async fn test_list_propagates_fetch_failure() {
        let err = list(&FailingSource).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Network(_)));
    }

    #[test]
    fn test_format_population() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(16644701), "16,644,701");
    }
}
