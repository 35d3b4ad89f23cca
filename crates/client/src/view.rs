use std::fmt;

use crate::model::ProductResource;
use crate::state::{CatalogState, Notice};

pub const TITLE: &str = "Product List";

/// What the catalog screen shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Error(String),
    Catalog(CatalogView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub notice: Option<Notice>,
    pub products: Vec<ProductResource>,
    pub pagination: Option<PaginationControls>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub pages: Vec<PageButton>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: u64,
    pub active: bool,
}

pub fn render(state: &CatalogState) -> View {
    if state.loading {
        return View::Loading;
    }
    if let Some(message) = &state.error {
        return View::Error(message.clone());
    }

    let pagination = state.pagination.as_ref().map(|meta| PaginationControls {
        previous_disabled: state.current_page <= 1,
        next_disabled: state.current_page >= meta.last_page,
        pages: (1..=meta.last_page)
            .map(|number| PageButton {
                number,
                active: number == state.current_page,
            })
            .collect(),
    });

    View::Catalog(CatalogView {
        notice: state.notice.clone(),
        products: state.items.clone(),
        pagination,
    })
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Loading => writeln!(f, "Loading..."),
            View::Error(message) => writeln!(f, "Error: {message}"),
            View::Catalog(catalog) => catalog.fmt(f),
        }
    }
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f, "{}", "=".repeat(TITLE.len()))?;

        match &self.notice {
            Some(Notice::Success(message)) => writeln!(f, "[ok] {message}")?,
            Some(Notice::Failure(message)) => writeln!(f, "[error] {message}")?,
            None => {}
        }

        if self.products.is_empty() {
            writeln!(f)?;
            writeln!(f, "No products on this page.")?;
        }
        for product in &self.products {
            writeln!(f)?;
            writeln!(f, "#{} {}", product.id, product.name)?;
            writeln!(f, "  {}", product.description)?;
            writeln!(f, "  Price: ${}", product.price)?;
            writeln!(f, "  Quantity: {}", product.quantity)?;
            writeln!(f, "  Image: {}", product.image)?;
        }

        if let Some(pagination) = &self.pagination {
            writeln!(f)?;
            writeln!(f, "{pagination}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PaginationControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Disabled ends are wrapped in parentheses.
        if self.previous_disabled {
            write!(f, "(« Previous)")?;
        } else {
            write!(f, "« Previous")?;
        }
        for page in &self.pages {
            if page.active {
                write!(f, " [{}]", page.number)?;
            } else {
                write!(f, " {}", page.number)?;
            }
        }
        if self.next_disabled {
            write!(f, " (Next »)")
        } else {
            write!(f, " Next »")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageMeta, ProductPage};
    use crate::state::{Command, Msg};
    use rust_decimal::Decimal;

    fn product(id: u64) -> ProductResource {
        ProductResource {
            id,
            name: format!("Product {id}"),
            description: format!("Description {id}"),
            price: Decimal::new(1999, 2),
            quantity: 4,
            image: format!("https://example.com/{id}.png"),
        }
    }

    fn state_on(current_page: u64, last_page: u64) -> CatalogState {
        let mut state = CatalogState::new();
        let (next, _) = state.update(Msg::Mount);
        state = next;
        if current_page != 1 {
            state.pagination = Some(meta(1, last_page));
            let (next, command) = state.update(Msg::ChangePage(current_page));
            assert!(matches!(command, Some(Command::Fetch { .. })));
            state = next;
        }
        let generation = state.generation;
        let (state, _) = state.update(Msg::FetchSucceeded {
            generation,
            page: ProductPage {
                data: vec![product(1), product(2)],
                links: Default::default(),
                meta: meta(current_page, last_page),
            },
        });
        state
    }

    fn meta(current_page: u64, last_page: u64) -> PageMeta {
        PageMeta {
            current_page,
            from: None,
            last_page,
            path: "/api/products".to_string(),
            per_page: 12,
            to: None,
            total: last_page * 12,
        }
    }

    #[test]
    fn loading_and_error_take_precedence() {
        assert_eq!(render(&CatalogState::new()), View::Loading);

        let mut state = state_on(1, 2);
        state.error = Some("Request failed".to_string());
        assert_eq!(render(&state), View::Error("Request failed".to_string()));
    }

    #[test]
    fn first_page_disables_previous() {
        let View::Catalog(catalog) = render(&state_on(1, 3)) else {
            panic!("expected catalog view");
        };
        let pagination = catalog.pagination.unwrap();
        assert!(pagination.previous_disabled);
        assert!(!pagination.next_disabled);
        assert_eq!(
            pagination.pages,
            vec![
                PageButton { number: 1, active: true },
                PageButton { number: 2, active: false },
                PageButton { number: 3, active: false },
            ]
        );
    }

    #[test]
    fn last_page_disables_next() {
        let View::Catalog(catalog) = render(&state_on(3, 3)) else {
            panic!("expected catalog view");
        };
        let pagination = catalog.pagination.unwrap();
        assert!(!pagination.previous_disabled);
        assert!(pagination.next_disabled);
        assert!(pagination.pages[2].active);
    }

    #[test]
    fn terminal_output_lists_products_and_pager() {
        let text = render(&state_on(1, 2)).to_string();

        assert!(text.starts_with("Product List\n"));
        assert!(text.contains("#1 Product 1"));
        assert!(text.contains("  Price: $19.99"));
        assert!(text.contains("  Quantity: 4"));
        assert!(text.contains("  Image: https://example.com/2.png"));
        assert!(text.contains("(« Previous) [1] 2 Next »"));
    }

    #[test]
    fn notice_is_shown_above_products() {
        let (state, _) = state_on(1, 1).update(Msg::Deleted {
            id: 1,
            message: "Producto eliminado correctamente".to_string(),
        });
        let text = render(&state).to_string();

        assert!(text.contains("[ok] Producto eliminado correctamente"));
        assert!(!text.contains("#1 Product 1"));
        assert!(text.contains("(« Previous) [1] (Next »)"));
    }
}
