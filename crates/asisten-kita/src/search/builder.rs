use serde::Serialize;
use serde_json::{json, Value};

use crate::store::Predicate;

use super::params::{ListingFilters, SearchParams, SortDirection, SortSpec, WorkerFilters};

const WORKER_SEARCH_FIELD: &str = "name";
const LISTING_SEARCH_FIELD: &str = "title";

/// Translate a worker search request into an ordered predicate list.
///
/// Pagination always leads, the free-text term (when present) follows, then
/// each populated filter in declaration order, and exactly one ordering
/// clause closes the list. Absent filters emit nothing.
pub fn worker_query(params: &SearchParams<WorkerFilters>) -> Vec<Predicate> {
    let mut queries = vec![
        Predicate::limit(params.clamped_limit()),
        Predicate::offset(params.offset),
    ];

    if let Some(term) = search_term(params.q.as_deref()) {
        queries.push(Predicate::search(WORKER_SEARCH_FIELD, term));
    }

    if let Some(filters) = &params.filters {
        if let Some(skills) = &filters.skills {
            if !skills.is_empty() {
                queries.push(Predicate::contains_any("skills", string_values(skills)));
            }
        }
        if let Some(location) = &filters.location {
            if !location.cities.is_empty() {
                queries.push(Predicate::contains_any(
                    "city",
                    string_values(&location.cities),
                ));
            }
            if !location.districts.is_empty() {
                queries.push(Predicate::contains_any(
                    "district",
                    string_values(&location.districts),
                ));
            }
        }
        if let Some(verified) = filters.verified {
            queries.push(Predicate::equal("is_verified", verified));
        }
        if filters.available == Some(true) {
            queries.push(Predicate::equal("status", "active"));
        }
        if let Some(rating) = filters.rating {
            if let Some(min) = rating.min {
                queries.push(Predicate::greater_than_equal("rating_avg", min));
            }
            if let Some(max) = rating.max {
                queries.push(Predicate::less_than_equal("rating_avg", max));
            }
        }
        if let Some(level) = filters.experience {
            queries.push(Predicate::greater_than_equal(
                "experience_years",
                u64::from(level.min_years()),
            ));
        }
        if let Some(work_types) = &filters.work_types {
            if !work_types.is_empty() {
                queries.push(Predicate::contains_any(
                    "work_arrangements",
                    enum_values(work_types),
                ));
            }
        }
        if let Some(age) = filters.age {
            if let Some(min) = age.min {
                queries.push(Predicate::greater_than_equal("age", min));
            }
            if let Some(max) = age.max {
                queries.push(Predicate::less_than_equal("age", max));
            }
        }
    }

    queries.push(order_clause(
        params.sort.as_ref(),
        Predicate::order_desc("rating_avg"),
    ));
    queries
}

/// Translate a lowongan search request into an ordered predicate list.
/// Same contract as [`worker_query`]; the default ordering is newest first.
pub fn listing_query(params: &SearchParams<ListingFilters>) -> Vec<Predicate> {
    let mut queries = vec![
        Predicate::limit(params.clamped_limit()),
        Predicate::offset(params.offset),
    ];

    if let Some(term) = search_term(params.q.as_deref()) {
        queries.push(Predicate::search(LISTING_SEARCH_FIELD, term));
    }

    if let Some(filters) = &params.filters {
        if let Some(job_types) = &filters.job_types {
            if !job_types.is_empty() {
                queries.push(Predicate::contains_any(
                    "job_types",
                    string_values(job_types),
                ));
            }
        }
        if let Some(skills) = &filters.skills {
            if !skills.is_empty() {
                queries.push(Predicate::contains_any("skills", string_values(skills)));
            }
        }
        if let Some(arrangements) = &filters.work_arrangements {
            if !arrangements.is_empty() {
                queries.push(Predicate::contains_any(
                    "work_arrangements",
                    enum_values(arrangements),
                ));
            }
        }
        if let Some(gender) = filters.gender {
            queries.push(Predicate::equal("gender", json!(gender)));
        }
        if let Some(city) = &filters.city {
            queries.push(Predicate::equal("city", city.as_str()));
        }
        if let Some(education) = filters.education {
            queries.push(Predicate::equal("education", json!(education)));
        }
        if let Some(salary) = filters.salary {
            if let Some(min) = salary.min {
                queries.push(Predicate::greater_than_equal("salary_min", min));
            }
            if let Some(max) = salary.max {
                queries.push(Predicate::less_than_equal("salary_max", max));
            }
        }
        if let Some(active) = filters.active {
            queries.push(Predicate::equal("is_active", active));
        }
        if let Some(owner) = &filters.owner {
            queries.push(Predicate::equal("user_id", owner.as_str()));
        }
    }

    queries.push(order_clause(
        params.sort.as_ref(),
        Predicate::order_desc("created_at"),
    ));
    queries
}

fn search_term(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|term| !term.is_empty())
}

fn order_clause(sort: Option<&SortSpec>, default: Predicate) -> Predicate {
    match sort {
        Some(spec) => match spec.direction {
            SortDirection::Asc => Predicate::order_asc(&spec.field),
            SortDirection::Desc => Predicate::order_desc(&spec.field),
        },
        None => default,
    }
}

fn string_values(items: &[String]) -> Vec<Value> {
    items.iter().map(|item| Value::String(item.clone())).collect()
}

fn enum_values<T: Serialize>(items: &[T]) -> Vec<Value> {
    items.iter().map(|item| json!(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExperienceLevel, Gender, WorkArrangement};
    use crate::search::params::{LocationFilter, RangeFilter, MAX_PAGE_SIZE};

    #[test]
    fn pagination_always_leads() {
        let params: SearchParams<WorkerFilters> = SearchParams::page(12, 24);
        let queries = worker_query(&params);
        assert_eq!(queries[0], Predicate::Limit(12));
        assert_eq!(queries[1], Predicate::Offset(24));
    }

    #[test]
    fn limit_is_clamped_to_the_page_cap() {
        let params: SearchParams<WorkerFilters> = SearchParams::page(10_000, 0);
        let queries = worker_query(&params);
        assert_eq!(queries[0], Predicate::Limit(MAX_PAGE_SIZE));

        let zero: SearchParams<WorkerFilters> = SearchParams::page(0, 0);
        assert_eq!(worker_query(&zero)[0], Predicate::Limit(1));
    }

    #[test]
    fn blank_search_term_emits_nothing() {
        let mut params: SearchParams<WorkerFilters> = SearchParams::default();
        params.q = Some("   ".to_string());
        let queries = worker_query(&params);
        assert!(queries
            .iter()
            .all(|query| !matches!(query, Predicate::Search { .. })));
    }

    #[test]
    fn worker_default_sort_is_rating_descending() {
        let params: SearchParams<WorkerFilters> = SearchParams::default();
        let queries = worker_query(&params);
        assert_eq!(
            queries.last(),
            Some(&Predicate::OrderDesc("rating_avg".to_string()))
        );
    }

    #[test]
    fn listing_default_sort_is_newest_first() {
        let params: SearchParams<ListingFilters> = SearchParams::default();
        let queries = listing_query(&params);
        assert_eq!(
            queries.last(),
            Some(&Predicate::OrderDesc("created_at".to_string()))
        );
    }

    #[test]
    fn explicit_sort_replaces_the_default() {
        let mut params: SearchParams<WorkerFilters> = SearchParams::default();
        params.sort = Some(SortSpec::asc("experience_years"));
        let queries = worker_query(&params);
        assert_eq!(
            queries.last(),
            Some(&Predicate::OrderAsc("experience_years".to_string()))
        );
        assert_eq!(
            queries
                .iter()
                .filter(|query| matches!(
                    query,
                    Predicate::OrderAsc(_) | Predicate::OrderDesc(_)
                ))
                .count(),
            1
        );
    }

    #[test]
    fn rating_min_alone_emits_no_max_predicate() {
        let mut params: SearchParams<WorkerFilters> = SearchParams::default();
        params.filters = Some(WorkerFilters {
            rating: Some(RangeFilter::at_least(4.0)),
            ..WorkerFilters::default()
        });
        let queries = worker_query(&params);
        assert!(queries.contains(&Predicate::greater_than_equal("rating_avg", 4.0)));
        assert!(queries
            .iter()
            .all(|query| !matches!(query, Predicate::LessThanEqual { attribute, .. } if attribute.as_str() == "rating_avg")));
    }

    #[test]
    fn absent_filters_emit_no_predicates() {
        let params: SearchParams<WorkerFilters> = SearchParams::default();
        let queries = worker_query(&params);
        // limit, offset, and the default ordering only
        assert_eq!(queries.len(), 3);
    }

    #[test]
    fn worker_filters_emit_in_declaration_order() {
        let mut params: SearchParams<WorkerFilters> = SearchParams::default();
        params.q = Some("siti".to_string());
        params.filters = Some(WorkerFilters {
            skills: Some(vec!["memasak".to_string()]),
            location: Some(LocationFilter::cities(&["Malang"])),
            verified: Some(true),
            available: Some(true),
            rating: Some(RangeFilter::between(4.0, 5.0)),
            experience: Some(ExperienceLevel::Intermediate),
            work_types: Some(vec![WorkArrangement::LiveIn]),
            age: Some(RangeFilter::between(20.0, 45.0)),
        });

        let attributes: Vec<String> = worker_query(&params)
            .iter()
            .map(|query| match query {
                Predicate::Limit(_) => "limit".to_string(),
                Predicate::Offset(_) => "offset".to_string(),
                Predicate::Search { attribute, .. }
                | Predicate::Equal { attribute, .. }
                | Predicate::ContainsAny { attribute, .. }
                | Predicate::GreaterThan { attribute, .. }
                | Predicate::GreaterThanEqual { attribute, .. }
                | Predicate::LessThan { attribute, .. }
                | Predicate::LessThanEqual { attribute, .. } => attribute.clone(),
                Predicate::OrderAsc(attribute) | Predicate::OrderDesc(attribute) => {
                    format!("order:{attribute}")
                }
            })
            .collect();

        assert_eq!(
            attributes,
            vec![
                "limit",
                "offset",
                "name",
                "skills",
                "city",
                "is_verified",
                "status",
                "rating_avg",
                "rating_avg",
                "experience_years",
                "work_arrangements",
                "age",
                "age",
                "order:rating_avg",
            ]
        );
    }

    #[test]
    fn listing_filters_emit_in_declaration_order() {
        let mut params: SearchParams<ListingFilters> = SearchParams::default();
        params.filters = Some(ListingFilters {
            job_types: Some(vec!["pembantu rumah tangga".to_string()]),
            skills: Some(vec!["memasak".to_string()]),
            work_arrangements: Some(vec![WorkArrangement::DailyCommute]),
            gender: Some(Gender::Female),
            city: Some("Malang".to_string()),
            education: Some(crate::domain::EducationLevel::Sma),
            salary: Some(RangeFilter::between(1_500_000.0, 4_000_000.0)),
            active: Some(true),
            owner: Some("user-1".to_string()),
        });

        let predicates = listing_query(&params);
        let attributes: Vec<&str> = predicates
            .iter()
            .filter_map(|query| match query {
                Predicate::Equal { attribute, .. }
                | Predicate::ContainsAny { attribute, .. }
                | Predicate::GreaterThanEqual { attribute, .. }
                | Predicate::LessThanEqual { attribute, .. } => Some(attribute.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(
            attributes,
            vec![
                "job_types",
                "skills",
                "work_arrangements",
                "gender",
                "city",
                "education",
                "salary_min",
                "salary_max",
                "is_active",
                "user_id",
            ]
        );
    }

    #[test]
    fn experience_level_maps_to_inclusive_year_floor() {
        let mut params: SearchParams<WorkerFilters> = SearchParams::default();
        params.filters = Some(WorkerFilters {
            experience: Some(ExperienceLevel::Experienced),
            ..WorkerFilters::default()
        });
        let queries = worker_query(&params);
        assert!(queries.contains(&Predicate::greater_than_equal("experience_years", 5u64)));
    }
}
