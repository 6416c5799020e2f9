use std::fmt;

/// Remote NVP operations this crate speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SetExpressCheckout,
    GetExpressCheckoutDetails,
    CreateRecurringPaymentsProfile,
    GetRecurringPaymentsProfileDetails,
    ManageRecurringPaymentsProfileStatus,
    DoExpressCheckoutPayment,
    GetTransactionDetails,
}

impl Operation {
    /// Value of the `METHOD` field
    pub fn method(&self) -> &'static str {
        match self {
            Operation::SetExpressCheckout => "SetExpressCheckout",
            Operation::GetExpressCheckoutDetails => "GetExpressCheckoutDetails",
            Operation::CreateRecurringPaymentsProfile => "CreateRecurringPaymentsProfile",
            Operation::GetRecurringPaymentsProfileDetails => "GetRecurringPaymentsProfileDetails",
            Operation::ManageRecurringPaymentsProfileStatus => {
                "ManageRecurringPaymentsProfileStatus"
            }
            Operation::DoExpressCheckoutPayment => "DoExpressCheckoutPayment",
            Operation::GetTransactionDetails => "GetTransactionDetails",
        }
    }

    /// Whether the operation needs a checkout token from SetExpressCheckout
    pub fn requires_token(&self) -> bool {
        matches!(
            self,
            Operation::GetExpressCheckoutDetails
                | Operation::CreateRecurringPaymentsProfile
                | Operation::DoExpressCheckoutPayment
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}
