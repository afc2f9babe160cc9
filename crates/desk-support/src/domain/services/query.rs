//! Ticket Query Engine
//!
//! The one filter/sort/paginate pipeline every list view shares. Order of
//! operations: visibility scope, text search, equality filters, stable
//! sort, pagination. All stages are pure over the supplied collection.

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{Ticket, TicketStatus};
use crate::domain::services::policy::{AuthorizationPolicy, TicketAction};
use crate::domain::value_objects::{Actor, Priority, SortField, SortOrder, ViewPreferences};

/// Combined search/filter/sort/paginate request for a ticket list view.
///
/// `None` filter fields mean "all". Pages are 1-based.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketQuery {
    pub search_term: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub user: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub page: usize,
    pub items_per_page: usize,
}

impl Default for TicketQuery {
    fn default() -> Self {
        Self {
            search_term: None,
            status: None,
            priority: None,
            department: None,
            category: None,
            user: None,
            sort_by: SortField::SubmittedDate,
            sort_order: SortOrder::Desc,
            page: 1,
            items_per_page: 10,
        }
    }
}

impl TicketQuery {
    /// Seed a query from a user's stored list-view defaults.
    pub fn from_preferences(prefs: &ViewPreferences) -> Self {
        Self {
            status: prefs.default_status,
            priority: prefs.default_priority,
            sort_by: prefs.default_sort_by,
            sort_order: prefs.default_sort_order,
            items_per_page: prefs.items_per_page.max(1),
            ..Self::default()
        }
    }

    /// Apply a sort column stored as free text (e.g. a persisted
    /// preference). Unknown fields fall back to submitted-date descending
    /// instead of failing the list view.
    pub fn with_sort(mut self, field: &str, order: SortOrder) -> Self {
        match SortField::parse(field) {
            Some(sort_by) => {
                self.sort_by = sort_by;
                self.sort_order = order;
            }
            None => {
                tracing::debug!(field, "unknown sort field, falling back to submitted date");
                self.sort_by = SortField::SubmittedDate;
                self.sort_order = SortOrder::Desc;
            }
        }
        self
    }
}

/// One page of query results.
#[derive(Clone, Debug)]
pub struct TicketPage {
    pub items: Vec<Ticket>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
}

pub struct QueryEngine;

impl QueryEngine {
    /// Run the full pipeline over `tickets` for `actor`.
    pub fn run(tickets: &[Ticket], query: &TicketQuery, actor: &Actor) -> TicketPage {
        let mut matched: Vec<&Ticket> = tickets
            .iter()
            .filter(|t| AuthorizationPolicy::can_perform(actor, TicketAction::View, t))
            .filter(|t| Self::matches_search(t, query.search_term.as_deref()))
            .filter(|t| Self::matches_filters(t, query))
            .collect();

        Self::sort(&mut matched, query.sort_by, query.sort_order);

        let total_count = matched.len();
        let items_per_page = query.items_per_page.max(1);
        let total_pages = total_count.div_ceil(items_per_page);

        let page = query.page.max(1);
        let start = (page - 1).saturating_mul(items_per_page);
        let end = (start + items_per_page).min(total_count);

        let items = if start >= total_count {
            vec![]
        } else {
            matched[start..end].iter().map(|t| (*t).clone()).collect()
        };

        tracing::debug!(
            total = total_count,
            page,
            total_pages,
            returned = items.len(),
            "ticket query"
        );

        TicketPage {
            items,
            total_count,
            total_pages,
            page,
        }
    }

    /// Case-insensitive substring match over the searchable fields; an
    /// empty or missing term matches everything.
    fn matches_search(ticket: &Ticket, term: Option<&str>) -> bool {
        let term = match term {
            Some(t) if !t.trim().is_empty() => t.to_lowercase(),
            _ => return true,
        };

        let mut fields = vec![
            ticket.title().to_lowercase(),
            ticket.description().to_lowercase(),
            ticket.submitted_by().to_lowercase(),
        ];
        if let Some(assignee) = ticket.assigned_to() {
            fields.push(assignee.to_lowercase());
        }

        fields.iter().any(|f| f.contains(&term))
    }

    fn matches_filters(ticket: &Ticket, query: &TicketQuery) -> bool {
        if let Some(status) = query.status {
            if ticket.status() != status {
                return false;
            }
        }
        if let Some(priority) = query.priority {
            if ticket.priority() != priority {
                return false;
            }
        }
        if let Some(ref department) = query.department {
            if !ticket.department().eq_ignore_ascii_case(department) {
                return false;
            }
        }
        if let Some(ref category) = query.category {
            let matches = ticket
                .category()
                .map(|c| c.eq_ignore_ascii_case(category))
                .unwrap_or(false);
            if !matches {
                return false;
            }
        }
        if let Some(ref user) = query.user {
            let matches =
                ticket.submitted_by() == user.as_str() || ticket.assigned_to() == Some(user.as_str());
            if !matches {
                return false;
            }
        }
        true
    }

    fn sort(tickets: &mut [&Ticket], sort_by: SortField, order: SortOrder) {
        // sort_by is stable; ties keep collection order
        tickets.sort_by(|a, b| {
            let ordering = match sort_by {
                SortField::Priority => a.priority().cmp(&b.priority()),
                SortField::Status => a.status().cmp(&b.status()),
                SortField::SubmittedDate => a.submitted_date().cmp(&b.submitted_date()),
                SortField::Title => a.title().cmp(b.title()),
                SortField::Department => a.department().cmp(b.department()),
            };
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn admin() -> Actor {
        Actor::new("boss", crate::domain::value_objects::Role::Admin)
    }

    fn make_ticket(n: usize, priority: Priority, department: &str) -> Ticket {
        let base = Utc::now() - Duration::hours(n as i64);
        Ticket::create(
            format!("Ticket {n:02}"),
            format!("Description for ticket {n}"),
            priority,
            department,
            format!("user{n}"),
            base,
        )
        .unwrap()
    }

    fn collection(count: usize) -> Vec<Ticket> {
        (0..count)
            .map(|n| make_ticket(n, Priority::Medium, "IT Support"))
            .collect()
    }

    #[test]
    fn test_pagination_boundaries() {
        let tickets = collection(25);
        let query = TicketQuery {
            status: None,
            priority: None,
            items_per_page: 10,
            page: 3,
            ..Default::default()
        };

        let page3 = QueryEngine::run(&tickets, &query, &admin());
        assert_eq!(page3.items.len(), 5);
        assert_eq!(page3.total_count, 25);
        assert_eq!(page3.total_pages, 3);

        let page4 = QueryEngine::run(&tickets, &TicketQuery { page: 4, ..query }, &admin());
        assert!(page4.items.is_empty());
        assert_eq!(page4.total_pages, 3);
    }

    #[test]
    fn test_priority_sorts_by_rank_not_lexically() {
        let tickets = vec![
            make_ticket(0, Priority::Critical, "IT Support"),
            make_ticket(1, Priority::High, "IT Support"),
            make_ticket(2, Priority::Low, "IT Support"),
            make_ticket(3, Priority::Urgent, "IT Support"),
            make_ticket(4, Priority::Medium, "IT Support"),
        ];
        let query = TicketQuery {
            sort_by: SortField::Priority,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        let page = QueryEngine::run(&tickets, &query, &admin());
        let priorities: Vec<Priority> = page.items.iter().map(|t| t.priority()).collect();
        assert_eq!(
            priorities,
            vec![
                Priority::Low,
                Priority::Medium,
                Priority::High,
                Priority::Urgent,
                Priority::Critical,
            ]
        );
    }

    #[test]
    fn test_query_is_deterministic() {
        let tickets = collection(40);
        let query = TicketQuery {
            sort_by: SortField::Priority,
            page: 2,
            ..Default::default()
        };

        let first = QueryEngine::run(&tickets, &query, &admin());
        let second = QueryEngine::run(&tickets, &query, &admin());

        let ids_first: Vec<_> = first.items.iter().map(|t| t.id().clone()).collect();
        let ids_second: Vec<_> = second.items.iter().map(|t| t.id().clone()).collect();
        assert_eq!(ids_first, ids_second);
    }

    #[test]
    fn test_search_matches_any_field_case_insensitively() {
        let mut tickets = collection(3);
        tickets[1]
            .update_details(
                Some("Mail outage".into()),
                None,
                None,
                None,
                None,
                Utc::now(),
            )
            .unwrap();
        tickets[2].assign("agent.smith", Utc::now()).unwrap();

        let query = TicketQuery {
            search_term: Some("MAIL".into()),
            ..Default::default()
        };
        let page = QueryEngine::run(&tickets, &query, &admin());
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].title(), "Mail outage");

        let query = TicketQuery {
            search_term: Some("agent.SMITH".into()),
            ..Default::default()
        };
        let page = QueryEngine::run(&tickets, &query, &admin());
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn test_user_filter_matches_submitter_or_assignee() {
        let mut tickets = collection(4);
        tickets[0].assign("a9", Utc::now()).unwrap();

        let query = TicketQuery {
            user: Some("a9".into()),
            ..Default::default()
        };
        assert_eq!(QueryEngine::run(&tickets, &query, &admin()).total_count, 1);

        let query = TicketQuery {
            user: Some("user2".into()),
            ..Default::default()
        };
        assert_eq!(QueryEngine::run(&tickets, &query, &admin()).total_count, 1);
    }

    #[test]
    fn test_status_and_priority_filters() {
        let mut tickets = vec![
            make_ticket(0, Priority::High, "IT Support"),
            make_ticket(1, Priority::Low, "IT Support"),
            make_ticket(2, Priority::High, "IT Support"),
        ];
        tickets[0].assign("a1", Utc::now()).unwrap();

        let query = TicketQuery {
            status: Some(TicketStatus::Open),
            priority: Some(Priority::High),
            ..Default::default()
        };
        let page = QueryEngine::run(&tickets, &query, &admin());
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn test_staff_scope_restricted_to_own_tickets() {
        let tickets = collection(6);
        let staff = Actor::new("user3", crate::domain::value_objects::Role::Staff);

        let page = QueryEngine::run(&tickets, &TicketQuery::default(), &staff);
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].submitted_by(), "user3");
    }

    #[test]
    fn test_agent_scope_uses_department_aliases() {
        let tickets = vec![
            make_ticket(0, Priority::Medium, "IT Support"),
            make_ticket(1, Priority::Medium, "Human Resources"),
            make_ticket(2, Priority::Medium, "Email Support"),
        ];
        let agent =
            Actor::new("a1", crate::domain::value_objects::Role::Agent).with_department("IT");

        let page = QueryEngine::run(&tickets, &TicketQuery::default(), &agent);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn test_preference_seeding_and_unknown_sort_fallback() {
        let prefs = ViewPreferences::default();
        let query = TicketQuery::from_preferences(&prefs);
        assert_eq!(query.status, Some(TicketStatus::Open));
        assert_eq!(query.priority, Some(Priority::High));
        assert_eq!(query.sort_by, SortField::Priority);
        assert_eq!(query.items_per_page, 10);

        let query = query.with_sort("mystery_column", SortOrder::Asc);
        assert_eq!(query.sort_by, SortField::SubmittedDate);
        assert_eq!(query.sort_order, SortOrder::Desc);
    }
}
