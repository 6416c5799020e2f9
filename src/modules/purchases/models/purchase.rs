// A purchase is a one-time payment for one or more digital goods.
//
// PayPal checks that PAYMENTREQUEST_0_ITEMAMT equals the sum of the line item
// amounts times their quantities, and that AMT covers ITEMAMT plus TAXAMT.
// Details are validated up front so those rejections never reach the API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Currency, Error, Result};

const MAX_NAME_LENGTH: usize = 127;
const MAX_INVOICE_LENGTH: usize = 127;
const MAX_CUSTOM_LENGTH: usize = 256;

fn default_name() -> String {
    "Digital Good".to_string()
}

fn default_quantity() -> u32 {
    1
}

/// One digital good in a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name shown to the buyer
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Price of a single unit, excluding tax
    pub amount: Decimal,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Tax on a single unit
    #[serde(default)]
    pub tax_amount: Option<Decimal>,

    /// Your own item number or SKU
    #[serde(default)]
    pub number: Option<String>,
}

impl LineItem {
    /// Create a new line item with validation
    ///
    /// # Arguments
    /// * `name` - Item name (max 127 chars)
    /// * `amount` - Unit price, must be non-negative
    /// * `quantity` - Must be positive
    pub fn new(name: impl Into<String>, amount: Decimal, quantity: u32) -> Result<Self> {
        let item = Self {
            name: name.into(),
            description: None,
            amount,
            quantity,
            tax_amount: None,
            number: None,
        };

        item.validate_fields()?;
        Ok(item)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tax(mut self, tax_amount: Decimal) -> Self {
        self.tax_amount = Some(tax_amount);
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// amount × quantity
    pub fn subtotal(&self) -> Result<Decimal> {
        self.amount
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| Error::validation(format!("Subtotal of item '{}' overflows", self.name)))
    }

    /// tax × quantity
    pub fn tax_total(&self) -> Result<Decimal> {
        self.tax_amount
            .unwrap_or(Decimal::ZERO)
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| Error::validation(format!("Tax total of item '{}' overflows", self.name)))
    }

    fn validate_fields(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Item name cannot be empty"));
        }

        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Err(Error::validation(format!(
                "Item name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }

        if self.quantity == 0 {
            return Err(Error::validation(format!(
                "Quantity must be positive for item '{}'",
                self.name
            )));
        }

        if self.amount < Decimal::ZERO {
            return Err(Error::validation(format!(
                "Item amount must be non-negative, got: {}",
                self.amount
            )));
        }

        Ok(())
    }

    fn validate(&self, currency: Currency) -> Result<()> {
        self.validate_fields()?;
        currency.validate_amount("item amount", self.amount)?;
        if let Some(tax) = self.tax_amount {
            currency.validate_amount("item tax", tax)?;
        }
        Ok(())
    }
}

/// Everything PayPal needs to know about a one-time purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDetails {
    /// Name of the single item when no line items are given
    #[serde(default = "default_name")]
    pub name: String,

    /// Description of what the buyer is purchasing
    #[serde(default)]
    pub description: String,

    /// Total cost to the buyer, including tax
    pub amount: Decimal,

    /// Sum of tax for all items
    #[serde(default)]
    pub tax_amount: Decimal,

    /// Your own invoice or tracking number
    #[serde(default)]
    pub invoice_number: Option<String>,

    /// Item number of the single item when no line items are given
    #[serde(default)]
    pub number: Option<String>,

    /// Free-form field for your own use
    #[serde(default)]
    pub custom: Option<String>,

    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl PurchaseDetails {
    pub fn new(amount: Decimal) -> Self {
        Self {
            name: default_name(),
            description: String::new(),
            amount,
            tax_amount: Decimal::ZERO,
            invoice_number: None,
            number: None,
            custom: None,
            items: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tax(mut self, tax_amount: Decimal) -> Self {
        self.tax_amount = tax_amount;
        self
    }

    pub fn with_invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = Some(invoice_number.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_custom(mut self, custom: impl Into<String>) -> Self {
        self.custom = Some(custom.into());
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Cost of the items before tax (`PAYMENTREQUEST_0_ITEMAMT`)
    pub fn item_amount(&self) -> Decimal {
        self.amount - self.tax_amount
    }

    /// Line items sent to PayPal
    ///
    /// Without explicit items, a single item is made from the purchase name,
    /// description and number, priced at the pre-tax amount.
    pub fn line_items(&self) -> Vec<LineItem> {
        if !self.items.is_empty() {
            return self.items.clone();
        }

        let tax = (self.tax_amount > Decimal::ZERO).then_some(self.tax_amount);
        let description = (!self.description.is_empty()).then(|| self.description.clone());

        vec![LineItem {
            name: self.name.clone(),
            description,
            amount: self.item_amount(),
            quantity: 1,
            tax_amount: tax,
            number: self.number.clone(),
        }]
    }

    /// Validate amounts and field lengths for the given currency
    pub fn validate(&self, currency: Currency) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::validation(format!(
                "Purchase amount must be positive, got: {}",
                self.amount
            )));
        }

        currency.validate_amount("amount", self.amount)?;
        currency.validate_amount("tax amount", self.tax_amount)?;

        if self.tax_amount > self.amount {
            return Err(Error::validation(format!(
                "Tax amount {} exceeds purchase amount {}",
                self.tax_amount, self.amount
            )));
        }

        if let Some(invoice) = &self.invoice_number {
            if invoice.chars().count() > MAX_INVOICE_LENGTH {
                return Err(Error::validation(format!(
                    "Invoice number cannot exceed {} characters",
                    MAX_INVOICE_LENGTH
                )));
            }
        }

        if let Some(custom) = &self.custom {
            if custom.chars().count() > MAX_CUSTOM_LENGTH {
                return Err(Error::validation(format!(
                    "Custom field cannot exceed {} characters",
                    MAX_CUSTOM_LENGTH
                )));
            }
        }

        let items = self.line_items();
        for item in &items {
            item.validate(currency)?;
        }

        if !self.items.is_empty() {
            let subtotal = checked_total(&items, LineItem::subtotal, "Line items total overflows")?;
            if currency.round(subtotal) != currency.round(self.item_amount()) {
                return Err(Error::validation(format!(
                    "Line items total {} but amount minus tax is {}",
                    subtotal,
                    self.item_amount()
                )));
            }

            if items.iter().any(|item| item.tax_amount.is_some()) {
                let tax_total =
                    checked_total(&items, LineItem::tax_total, "Line item taxes total overflows")?;
                if currency.round(tax_total) != currency.round(self.tax_amount) {
                    return Err(Error::validation(format!(
                        "Line item taxes total {} but tax amount is {}",
                        tax_total, self.tax_amount
                    )));
                }
            }
        }

        Ok(())
    }
}

fn checked_total(
    items: &[LineItem],
    value: fn(&LineItem) -> Result<Decimal>,
    overflow: &str,
) -> Result<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        total
            .checked_add(value(item)?)
            .ok_or_else(|| Error::validation(overflow))
    })
}
