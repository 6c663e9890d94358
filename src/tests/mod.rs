use super::generator::{self, AccessorNaming, HttpMethod, Request};
use super::model::{labels_for, Field, Label};
use super::{describe, parser};
use anyhow::Result;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHOP: &str = r#"
package shop

import "io"

// Item is sold in the shop.
type Item struct {
    sku      string `json:"sku"`
    Title    string
    price, discount float64
    tags     []string // free-form
    io.Reader
    *Base
}

type Catalog interface {
    Find(string) (*Item, error)
    Add(item *Item, qty int) error
    io.Closer
}

func (i Item) String() string { return i.sku }
"#;

    fn field(name: &str, ty: &str) -> Field {
        Field {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }

    #[test]
    fn test_extract_user_example() -> Result<()> {
        let records = parser::extract_records("type User struct {\n\tname string\n\tAge int\n}")?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "User");
        assert_eq!(records[0].fields, vec![field("name", "string")]);
        Ok(())
    }

    #[test]
    fn test_extract_private_fields_in_order() -> Result<()> {
        let source = parser::parse(SHOP)?;
        let item = source.record("Item").expect("Item is declared");
        assert_eq!(
            item.fields,
            vec![
                field("sku", "string"),
                field("price", "float64"),
                field("discount", "float64"),
                field("tags", "[]string"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_extract_contract_methods() -> Result<()> {
        let contracts = parser::extract_contracts(SHOP)?;
        assert_eq!(contracts.len(), 1);
        let catalog = &contracts[0];
        assert_eq!(catalog.name, "Catalog");
        assert_eq!(catalog.methods.len(), 2);
        assert_eq!(catalog.methods[0].signature, "Find(string)");
        assert_eq!(catalog.methods[0].returns, "(*Item, error)");
        assert_eq!(catalog.methods[1].signature, "Add(item *Item, qty int)");
        assert_eq!(catalog.methods[1].returns, "error");
        Ok(())
    }

    #[test]
    fn test_declaration_order_and_duplicates() -> Result<()> {
        let source = r#"
type B struct { b int }
type A struct {
    a int
}
type B struct {
    other string
}
"#;
        let records = parser::extract_records(source)?;
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(records[0].fields, vec![field("other", "string")]);
        Ok(())
    }

    #[test]
    fn test_nested_struct_does_not_truncate_body() -> Result<()> {
        let source = r#"
type Config struct {
    server struct {
        host string
        port int
    }
    debug bool
}
"#;
        let records = parser::extract_records(source)?;
        assert_eq!(
            records[0].fields,
            vec![
                field("server", "struct { host string port int }"),
                field("debug", "bool"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_describe_declarations() -> Result<()> {
        let source = parser::parse(SHOP)?;
        let expected = "struct Item
\tsku string
\tprice float64
\tdiscount float64
\ttags []string
interface Catalog
\tFind(string) (*Item, error)
\tAdd(item *Item, qty int) error";
        assert_eq!(describe(&source), expected);
        Ok(())
    }

    #[test]
    fn test_no_declarations() -> Result<()> {
        let source = parser::parse("package main\n\nfunc main() {}\n")?;
        assert!(source.is_empty());
        assert!(labels_for(&source).is_empty());
        Ok(())
    }

    #[test]
    fn test_labels_round_trip_through_generate() -> Result<()> {
        let source = parser::parse(SHOP)?;
        let labels = labels_for(&source);

        let texts: Vec<String> = labels.iter().map(Label::to_string).collect();
        assert_eq!(texts[0], "Item Get sku ( string )");
        assert_eq!(texts[1], "Item Set sku ( string )");
        assert!(texts.contains(&"Item Constructor".to_string()));
        assert!(texts.contains(&"Item Builder".to_string()));
        assert_eq!(texts.last().map(String::as_str), Some("Catalog"));

        for text in texts.iter().filter(|t| t.starts_with("Item ")) {
            let label: Label = text.parse()?;
            assert_eq!(&label.to_string(), text);
            let request = Request::from_label(&label, AccessorNaming::Exported)?;
            let fragment = generator::generate(&source, &request)?;
            assert!(fragment.starts_with('\n'));
            assert!(!fragment.ends_with('\n'));
        }
        Ok(())
    }

    #[test]
    fn test_getter_for_widget_count() -> Result<()> {
        let source = parser::parse("type Widget struct {\n\tcount int\n}\n")?;
        let label: Label = "Widget Get count ( int )".parse()?;
        let fragment = generator::generate(
            &source,
            &Request::from_label(&label, AccessorNaming::Exported)?,
        )?;

        assert_eq!(fragment.matches("func ").count(), 1);
        assert!(fragment.contains("func (w *Widget) Count() int {"));
        assert!(fragment.contains("return w.count"));
        Ok(())
    }

    #[test]
    fn test_constructor_and_builder_for_item() -> Result<()> {
        let source = parser::parse(SHOP)?;

        let constructor = generator::generate(
            &source,
            &Request::Constructor {
                record: "Item".to_string(),
            },
        )?;
        assert!(constructor.starts_with(
            "\nfunc NewItem(sku string, price float64, discount float64, tags []string) *Item {"
        ));
        assert!(constructor.contains("\ti.discount = discount\n"));

        let builder = generator::generate(
            &source,
            &Request::Builder {
                record: "Item".to_string(),
            },
        )?;
        assert!(builder.contains("func (i *ItemBuilder) Tags(tags []string) *ItemBuilder {"));
        assert!(builder.contains("\t\tprice: i.price,\n"));
        Ok(())
    }

    #[test]
    fn test_implement_catalog() -> Result<()> {
        let source = parser::parse(SHOP)?;
        let fragment = generator::generate(
            &source,
            &Request::Stubs {
                interface: "Catalog".to_string(),
                target: "MemCatalog".to_string(),
            },
        )?;

        let expected = "
// Find implements Catalog.
func (m *MemCatalog) Find(string string) (*Item, error) {
\t// TODO: implement
\tpanic(\"not implemented\")
}

// Add implements Catalog.
func (m *MemCatalog) Add(item *Item, qty int) error {
\t// TODO: implement
\tpanic(\"not implemented\")
}";
        assert_eq!(fragment, expected);
        Ok(())
    }

    #[test]
    fn test_handler_with_selected_verbs() -> Result<()> {
        let verbs = generator::parse_verbs("Get,Post")?;
        assert_eq!(verbs, vec![HttpMethod::Get, HttpMethod::Post]);

        let source = parser::parse(SHOP)?;
        let fragment = generator::generate(
            &source,
            &Request::Handler {
                target: "Item".to_string(),
                verbs,
            },
        )?;

        assert_eq!(fragment.matches("\tcase ").count(), 2);
        assert_eq!(fragment.matches("\tdefault:").count(), 1);
        assert!(fragment.find("http.MethodGet") < fragment.find("http.MethodPost"));
        assert!(fragment.contains("http.StatusMethodNotAllowed"));
        Ok(())
    }
}
