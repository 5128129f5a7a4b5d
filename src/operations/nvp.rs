//! PayPal Classic NVP operations.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

use super::{Operation, check_len, format_amount};
use crate::{
    error::{GatewayError, Result},
    gateway::ApiFamily,
    nvp::FieldMultimap,
    projection::NvpValues,
};

/// Longest accepted `AUTHORIZATIONID` for `DoVoid`.
pub const MAX_AUTHORIZATION_ID_LEN: usize = 19;
/// Longest accepted `NOTE` for `DoVoid`.
pub const MAX_NOTE_LEN: usize = 255;
/// Longest accepted `MSGSUBID` for `DoVoid`.
pub const MAX_MESSAGE_ID_LEN: usize = 38;

fn method(name: &str) -> FieldMultimap {
    let mut fields = FieldMultimap::new();
    fields.set("METHOD", name);
    fields
}

/// Payment action for express checkout and reference transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAction {
    /// Immediate charge.
    Sale,
    /// Authorize now, capture later.
    Authorization,
    /// Order to be authorized and captured later.
    Order,
}

impl PaymentAction {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "Sale",
            Self::Authorization => "Authorization",
            Self::Order => "Order",
        }
    }
}

/// A digital good sold through express checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitalGood {
    /// Item name.
    pub name: String,
    /// Unit price.
    pub amount: Decimal,
    /// Quantity.
    pub quantity: u16,
}

impl DigitalGood {
    /// Creates a single unit of a good.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self { name: name.into(), amount, quantity: 1 }
    }

    /// Sums unit price times quantity over `goods`.
    #[must_use]
    pub fn total(goods: &[Self]) -> Decimal {
        goods.iter().map(|good| good.amount * Decimal::from(good.quantity)).sum()
    }
}

/// `SetExpressCheckout` for a basket of digital goods.
///
/// Shipping is disabled and the buyer does not need a PayPal account.
#[derive(Debug, Clone)]
pub struct SetExpressCheckoutDigitalGoods {
    /// Order total.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency_code: String,
    /// Where PayPal sends the buyer after approval.
    pub return_url: String,
    /// Where PayPal sends the buyer after cancelling.
    pub cancel_url: String,
    /// Line items, encoded as `L_PAYMENTREQUEST_0_*n`.
    pub goods: Vec<DigitalGood>,
}

impl Operation for SetExpressCheckoutDigitalGoods {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("SetExpressCheckout");
        fields.add("PAYMENTREQUEST_0_AMT", format_amount(self.amount));
        fields.add("PAYMENTREQUEST_0_PAYMENTACTION", PaymentAction::Sale.as_str());
        fields.add("PAYMENTREQUEST_0_CURRENCYCODE", self.currency_code);
        fields.add("RETURNURL", self.return_url);
        fields.add("CANCELURL", self.cancel_url);
        fields.add("REQCONFIRMSHIPPING", "0");
        fields.add("NOSHIPPING", "1");
        fields.add("SOLUTIONTYPE", "Sole");

        for (i, good) in self.goods.into_iter().enumerate() {
            fields.add(format!("L_PAYMENTREQUEST_0_NAME{i}"), good.name);
            fields.add(format!("L_PAYMENTREQUEST_0_AMT{i}"), format_amount(good.amount));
            fields.add(format!("L_PAYMENTREQUEST_0_QTY{i}"), good.quantity.to_string());
            fields.add(format!("L_PAYMENTREQUEST_0_ITEMCATEGORY{i}"), "Digital");
        }

        Ok(fields)
    }
}

/// `SetExpressCheckout` for one item billed as a recurring payment.
#[derive(Debug, Clone)]
pub struct SetExpressCheckoutRecurring {
    /// Initial amount.
    pub amount: Decimal,
    /// Where PayPal sends the buyer after approval.
    pub return_url: String,
    /// Where PayPal sends the buyer after cancelling.
    pub cancel_url: String,
    /// The subscribed item; its name doubles as the agreement description.
    pub item: DigitalGood,
}

impl Operation for SetExpressCheckoutRecurring {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("SetExpressCheckout");
        fields.add("PAYMENTREQUEST_0_AMT", format_amount(self.amount));
        fields.add("NOSHIPPING", "1");
        fields.add("L_PAYMENTREQUEST_0_NAME0", self.item.name.clone());
        fields.add("L_BILLINGTYPE0", "RecurringPayments");
        fields.add("L_BILLINGAGREEMENTDESCRIPTION0", self.item.name);
        fields.add("L_PAYMENTTYPE0", "InstantOnly");
        fields.add("RETURNURL", self.return_url);
        fields.add("CANCELURL", self.cancel_url);
        Ok(fields)
    }
}

/// `SetExpressCheckout` starting a merchant-initiated billing agreement.
///
/// The returned token is not an agreement yet; pass it to
/// [`CreateBillingAgreement`] once the buyer approved.
#[derive(Debug, Clone)]
pub struct SetExpressCheckoutInitiateBilling {
    /// Where PayPal sends the buyer after approval.
    pub return_url: String,
    /// Where PayPal sends the buyer after cancelling.
    pub cancel_url: String,
    /// ISO currency code.
    pub currency_code: String,
    /// Description shown to the buyer.
    pub billing_agreement_description: String,
}

impl Operation for SetExpressCheckoutInitiateBilling {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("SetExpressCheckout");
        fields.add("PAYMENTREQUEST_0_PAYMENTACTION", "AUTHORIZATION");
        fields.add("PAYMENTREQUEST_0_AMT", format_amount(Decimal::ZERO));
        fields.add("PAYMENTREQUEST_0_CURRENCYCODE", self.currency_code);
        fields.add("L_BILLINGTYPE0", "MerchantInitiatedBilling");
        fields.add("L_BILLINGAGREEMENTDESCRIPTION0", self.billing_agreement_description);
        fields.add("RETURNURL", self.return_url);
        fields.add("CANCELURL", self.cancel_url);
        Ok(fields)
    }
}

/// `SetExpressCheckout` charging a basket now and opening a single billing
/// agreement for later merchant-initiated payments.
///
/// The first good's name becomes the payment description. Only instant
/// funding is allowed and the buyer lands on the PayPal login page.
#[derive(Debug, Clone)]
pub struct SetExpressCheckoutPaymentAndInitiateBilling {
    /// Order total.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency_code: String,
    /// Where PayPal sends the buyer after approval.
    pub return_url: String,
    /// Where PayPal sends the buyer after cancelling.
    pub cancel_url: String,
    /// Agreement description shown to the buyer.
    pub billing_agreement_description: String,
    /// Merchant name on the PayPal pages.
    pub brand_name: String,
    /// Logo URL on the PayPal pages.
    pub logo_image: String,
    /// Goods in the basket; at least one is required.
    pub goods: Vec<DigitalGood>,
}

impl Operation for SetExpressCheckoutPaymentAndInitiateBilling {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let Some(first) = self.goods.first() else {
            return Err(GatewayError::InvalidInput(
                "payment and billing checkout needs at least one good".to_owned(),
            ));
        };

        let mut fields = method("SetExpressCheckout");
        fields.add("PAYMENTREQUEST_0_AMT", format_amount(self.amount));
        fields.add("PAYMENTREQUEST_0_PAYMENTACTION", PaymentAction::Sale.as_str());
        fields.add("PAYMENTREQUEST_0_CURRENCYCODE", self.currency_code);
        fields.add("PAYMENTREQUEST_0_DESC", first.name.as_str());
        fields.add("PAYMENTREQUEST_0_ALLOWEDPAYMENTMETHOD", "InstantPaymentOnly");

        for (i, good) in self.goods.iter().enumerate() {
            fields.add(format!("L_PAYMENTREQUEST_0_QTY{i}"), good.quantity.to_string());
        }

        fields.add("L_BILLINGTYPE0", "MerchantInitiatedBillingSingleAgreement");
        fields.add("L_BILLINGAGREEMENTDESCRIPTION0", self.billing_agreement_description);
        fields.add("L_PAYMENTTYPE0", "Any");
        fields.add("RETURNURL", self.return_url);
        fields.add("CANCELURL", self.cancel_url);
        fields.add("REQCONFIRMSHIPPING", "0");
        fields.add("NOSHIPPING", "1");
        fields.add("SOLUTIONTYPE", "Mark");
        fields.add("LANDINPAGE", "Login");
        fields.add("CHANNELTYPE", "Merchant");
        fields.add("BRANDNAME", self.brand_name);
        fields.add("LOGOIMG", self.logo_image);
        Ok(fields)
    }
}

/// `DoExpressCheckoutPayment`: completes an approved express checkout.
#[derive(Debug, Clone)]
pub struct DoExpressCheckoutPayment {
    /// Token from `SetExpressCheckout`.
    pub token: String,
    /// Payer id returned to the return URL.
    pub payer_id: String,
    /// How the payment is settled.
    pub action: PaymentAction,
    /// ISO currency code.
    pub currency_code: String,
    /// Final amount.
    pub amount: Decimal,
}

impl DoExpressCheckoutPayment {
    /// Completes the checkout as an immediate sale.
    #[must_use]
    pub fn sale(
        token: impl Into<String>,
        payer_id: impl Into<String>,
        currency_code: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            token: token.into(),
            payer_id: payer_id.into(),
            action: PaymentAction::Sale,
            currency_code: currency_code.into(),
            amount,
        }
    }
}

impl Operation for DoExpressCheckoutPayment {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("DoExpressCheckoutPayment");
        fields.add("TOKEN", self.token);
        fields.add("PAYERID", self.payer_id);
        fields.add("PAYMENTREQUEST_0_PAYMENTACTION", self.action.as_str());
        fields.add("PAYMENTREQUEST_0_CURRENCYCODE", self.currency_code);
        fields.add("PAYMENTREQUEST_0_AMT", format_amount(self.amount));
        Ok(fields)
    }
}

/// `GetExpressCheckoutDetails`.
#[derive(Debug, Clone)]
pub struct GetExpressCheckoutDetails {
    /// Token from `SetExpressCheckout`.
    pub token: String,
}

impl Operation for GetExpressCheckoutDetails {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("GetExpressCheckoutDetails");
        fields.add("TOKEN", self.token);
        Ok(fields)
    }
}

/// `CreateBillingAgreement` from an approved token.
#[derive(Debug, Clone)]
pub struct CreateBillingAgreement {
    /// Token from [`SetExpressCheckoutInitiateBilling`].
    pub token: String,
}

impl Operation for CreateBillingAgreement {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("CreateBillingAgreement");
        fields.add("TOKEN", self.token);
        Ok(fields)
    }
}

/// `DoReferenceTransaction`: charges an existing billing agreement.
#[derive(Debug, Clone)]
pub struct DoReferenceTransaction {
    /// Amount to charge.
    pub amount: Decimal,
    /// Billing agreement or earlier transaction id.
    pub reference_id: String,
    /// How the payment is settled.
    pub action: PaymentAction,
}

impl Operation for DoReferenceTransaction {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("DoReferenceTransaction");
        fields.add("AMT", format_amount(self.amount));
        fields.add("PAYMENTACTION", self.action.as_str());
        fields.add("REFERENCEID", self.reference_id);
        Ok(fields)
    }
}

/// `DoCapture`: captures an authorized payment.
#[derive(Debug, Clone)]
pub struct DoCapture {
    /// Amount to capture.
    pub amount: Decimal,
    /// Authorization (or reference transaction) id.
    pub authorization_id: String,
    /// Whether this is the last capture against the authorization.
    pub complete: bool,
    /// Merchant invoice number.
    pub invoice_id: String,
}

impl Operation for DoCapture {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("DoCapture");
        fields.add("AMT", format_amount(self.amount));
        fields.add("INVNUM", self.invoice_id);
        fields.add("AUTHORIZATIONID", self.authorization_id);
        fields.add("COMPLETETYPE", if self.complete { "Complete" } else { "NotComplete" });
        Ok(fields)
    }
}

/// `DoVoid`: voids an authorization.
///
/// Empty `note` and `message_id` are left out of the request.
#[derive(Debug, Clone, Default)]
pub struct DoVoid {
    /// Authorization id, at most 19 characters.
    pub authorization_id: String,
    /// Note to the buyer, at most 255 characters.
    pub note: String,
    /// Idempotency message id, at most 38 characters.
    pub message_id: String,
}

impl DoVoid {
    /// Voids `authorization_id` with no note.
    #[must_use]
    pub fn new(authorization_id: impl Into<String>) -> Self {
        Self { authorization_id: authorization_id.into(), ..Default::default() }
    }
}

impl Operation for DoVoid {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        check_len("authorization id", &self.authorization_id, MAX_AUTHORIZATION_ID_LEN)?;
        check_len("note", &self.note, MAX_NOTE_LEN)?;
        check_len("message id", &self.message_id, MAX_MESSAGE_ID_LEN)?;

        let mut fields = method("DoVoid");
        fields.add("AUTHORIZATIONID", self.authorization_id);
        if !self.note.is_empty() {
            fields.add("NOTE", self.note);
        }
        if !self.message_id.is_empty() {
            fields.add("MSGSUBID", self.message_id);
        }
        Ok(fields)
    }
}

/// `RefundTransaction`.
#[derive(Debug, Clone)]
pub struct RefundTransaction {
    transaction_id: String,
    amount: Option<Decimal>,
}

impl RefundTransaction {
    /// Refunds the whole transaction.
    #[must_use]
    pub fn full(transaction_id: impl Into<String>) -> Self {
        Self { transaction_id: transaction_id.into(), amount: None }
    }

    /// Refunds `amount` of the transaction.
    #[must_use]
    pub fn partial(transaction_id: impl Into<String>, amount: Decimal) -> Self {
        Self { transaction_id: transaction_id.into(), amount: Some(amount) }
    }
}

impl Operation for RefundTransaction {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("RefundTransaction");
        fields.set("TRANSACTIONID", self.transaction_id);
        match self.amount {
            None => fields.set("REFUNDTYPE", "FULL"),
            Some(amount) => {
                fields.set("REFUNDTYPE", "PARTIAL");
                fields.set("AMT", format_amount(amount));
            }
        }
        Ok(fields)
    }
}

/// `CreateRecurringPaymentsProfile`.
///
/// Profile details (`PROFILESTARTDATE`, `BILLINGPERIOD`, ...) are passed
/// through as extra fields.
#[derive(Debug, Clone)]
pub struct CreateRecurringPaymentsProfile {
    token: String,
    params: FieldMultimap,
}

impl CreateRecurringPaymentsProfile {
    /// Creates a profile for an approved token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), params: FieldMultimap::new() }
    }

    /// Adds a profile field.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(key, value);
        self
    }
}

impl Operation for CreateRecurringPaymentsProfile {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("CreateRecurringPaymentsProfile");
        fields.add("TOKEN", self.token);
        fields.extend(self.params.pairs());
        Ok(fields)
    }
}

/// `UpdateRecurringPaymentsProfile`.
#[derive(Debug, Clone)]
pub struct UpdateRecurringPaymentsProfile {
    profile_id: String,
    params: FieldMultimap,
}

impl UpdateRecurringPaymentsProfile {
    /// Updates `profile_id`.
    #[must_use]
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self { profile_id: profile_id.into(), params: FieldMultimap::new() }
    }

    /// Adds a field to change.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(key, value);
        self
    }
}

impl Operation for UpdateRecurringPaymentsProfile {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("UpdateRecurringPaymentsProfile");
        fields.set("PROFILEID", self.profile_id);
        fields.extend(self.params.pairs());
        Ok(fields)
    }
}

/// Status change for a recurring payments profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    /// Cancel permanently.
    Cancel,
    /// Suspend billing.
    Suspend,
    /// Resume a suspended profile.
    Reactivate,
}

impl ProfileAction {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cancel => "Cancel",
            Self::Suspend => "Suspend",
            Self::Reactivate => "Reactivate",
        }
    }
}

/// `ManageRecurringPaymentsProfileStatus`.
#[derive(Debug, Clone)]
pub struct ManageRecurringPaymentsProfileStatus {
    /// Profile to change.
    pub profile_id: String,
    /// New status.
    pub action: ProfileAction,
}

impl Operation for ManageRecurringPaymentsProfileStatus {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("ManageRecurringPaymentsProfileStatus");
        fields.set("PROFILEID", self.profile_id);
        fields.set("ACTION", self.action.as_str());
        Ok(fields)
    }
}

/// `GetRecurringPaymentsProfileDetails`.
#[derive(Debug, Clone)]
pub struct GetRecurringPaymentsProfileDetails {
    /// Profile to read.
    pub profile_id: String,
}

impl Operation for GetRecurringPaymentsProfileDetails {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("GetRecurringPaymentsProfileDetails");
        fields.set("PROFILEID", self.profile_id);
        Ok(fields)
    }
}

/// `BillOutstandingAmount`: bills the outstanding balance of a profile.
#[derive(Debug, Clone)]
pub struct BillOutstandingAmount {
    /// Profile to bill.
    pub profile_id: String,
}

impl Operation for BillOutstandingAmount {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("BillOutstandingAmount");
        fields.set("PROFILEID", self.profile_id);
        Ok(fields)
    }
}

/// `TransactionSearch` for the transactions of one profile.
#[derive(Debug, Clone)]
pub struct ProfileTransactionSearch {
    /// Profile whose transactions are listed.
    pub profile_id: String,
    /// Earliest transaction time.
    pub start_date: DateTime<Utc>,
}

impl Operation for ProfileTransactionSearch {
    const FAMILY: ApiFamily = ApiFamily::Nvp;
    type Output = NvpValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        let mut fields = method("TransactionSearch");
        fields.set("PROFILEID", self.profile_id);
        fields.set("STARTDATE", self.start_date.to_rfc3339_opts(SecondsFormat::Secs, true));
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_digital_goods_line_items() {
        let op = SetExpressCheckoutDigitalGoods {
            amount: dec!(15),
            currency_code: "USD".to_owned(),
            return_url: "https://shop.example.com/return".to_owned(),
            cancel_url: "https://shop.example.com/cancel".to_owned(),
            goods: vec![
                DigitalGood::new("Ebook", dec!(10)),
                DigitalGood { name: "Song".to_owned(), amount: dec!(2.5), quantity: 2 },
            ],
        };

        let fields = op.into_fields().unwrap();
        assert_eq!(fields.get("METHOD"), Some("SetExpressCheckout"));
        assert_eq!(fields.get("PAYMENTREQUEST_0_AMT"), Some("15.00"));
        assert_eq!(fields.get("SOLUTIONTYPE"), Some("Sole"));
        assert_eq!(fields.get("L_PAYMENTREQUEST_0_NAME0"), Some("Ebook"));
        assert_eq!(fields.get("L_PAYMENTREQUEST_0_AMT1"), Some("2.50"));
        assert_eq!(fields.get("L_PAYMENTREQUEST_0_QTY1"), Some("2"));
        assert_eq!(fields.get("L_PAYMENTREQUEST_0_ITEMCATEGORY1"), Some("Digital"));
        assert!(!fields.contains_key("L_PAYMENTREQUEST_0_NAME2"));
    }

    #[test]
    fn test_digital_goods_total() {
        let goods = [
            DigitalGood::new("Ebook", dec!(10)),
            DigitalGood { name: "Song".to_owned(), amount: dec!(0.99), quantity: 3 },
        ];
        assert_eq!(DigitalGood::total(&goods), dec!(12.97));
        assert_eq!(DigitalGood::total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_recurring_checkout_uses_item_name_as_description() {
        let op = SetExpressCheckoutRecurring {
            amount: dec!(4.99),
            return_url: "https://r".to_owned(),
            cancel_url: "https://c".to_owned(),
            item: DigitalGood::new("Monthly plan", dec!(4.99)),
        };

        let fields = op.into_fields().unwrap();
        assert_eq!(fields.get("L_BILLINGTYPE0"), Some("RecurringPayments"));
        assert_eq!(fields.get("L_BILLINGAGREEMENTDESCRIPTION0"), Some("Monthly plan"));
        assert_eq!(fields.get("L_PAYMENTTYPE0"), Some("InstantOnly"));
    }

    #[test]
    fn test_initiate_billing_zero_amount() {
        let op = SetExpressCheckoutInitiateBilling {
            return_url: "https://r".to_owned(),
            cancel_url: "https://c".to_owned(),
            currency_code: "EUR".to_owned(),
            billing_agreement_description: "Pay as you go".to_owned(),
        };

        let fields = op.into_fields().unwrap();
        assert_eq!(fields.get("PAYMENTREQUEST_0_AMT"), Some("0.00"));
        assert_eq!(fields.get("PAYMENTREQUEST_0_PAYMENTACTION"), Some("AUTHORIZATION"));
        assert_eq!(fields.get("L_BILLINGTYPE0"), Some("MerchantInitiatedBilling"));
    }

    fn payment_and_billing(
        goods: Vec<DigitalGood>,
    ) -> SetExpressCheckoutPaymentAndInitiateBilling {
        SetExpressCheckoutPaymentAndInitiateBilling {
            amount: dec!(12.5),
            currency_code: "USD".to_owned(),
            return_url: "https://shop.example.com/return".to_owned(),
            cancel_url: "https://shop.example.com/cancel".to_owned(),
            billing_agreement_description: "Top-ups".to_owned(),
            brand_name: "Example Shop".to_owned(),
            logo_image: "https://shop.example.com/logo.png".to_owned(),
            goods,
        }
    }

    #[test]
    fn test_payment_and_billing_field_order() {
        let op = payment_and_billing(vec![
            DigitalGood::new("Credits", dec!(10)),
            DigitalGood { name: "Bonus".to_owned(), amount: dec!(1.25), quantity: 2 },
        ]);

        let fields = op.into_fields().unwrap();
        let keys: Vec<&str> = fields.iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            [
                "METHOD",
                "PAYMENTREQUEST_0_AMT",
                "PAYMENTREQUEST_0_PAYMENTACTION",
                "PAYMENTREQUEST_0_CURRENCYCODE",
                "PAYMENTREQUEST_0_DESC",
                "PAYMENTREQUEST_0_ALLOWEDPAYMENTMETHOD",
                "L_PAYMENTREQUEST_0_QTY0",
                "L_PAYMENTREQUEST_0_QTY1",
                "L_BILLINGTYPE0",
                "L_BILLINGAGREEMENTDESCRIPTION0",
                "L_PAYMENTTYPE0",
                "RETURNURL",
                "CANCELURL",
                "REQCONFIRMSHIPPING",
                "NOSHIPPING",
                "SOLUTIONTYPE",
                "LANDINPAGE",
                "CHANNELTYPE",
                "BRANDNAME",
                "LOGOIMG",
            ]
        );
        assert_eq!(fields.get("PAYMENTREQUEST_0_AMT"), Some("12.50"));
        assert_eq!(fields.get("PAYMENTREQUEST_0_DESC"), Some("Credits"));
        assert_eq!(fields.get("L_PAYMENTREQUEST_0_QTY1"), Some("2"));
        assert_eq!(
            fields.get("L_BILLINGTYPE0"),
            Some("MerchantInitiatedBillingSingleAgreement")
        );
        assert_eq!(fields.get("SOLUTIONTYPE"), Some("Mark"));
        assert_eq!(fields.get("BRANDNAME"), Some("Example Shop"));
    }

    #[test]
    fn test_payment_and_billing_needs_goods() {
        let result = payment_and_billing(Vec::new()).into_fields();
        assert!(matches!(result, Err(GatewayError::InvalidInput(_))));
    }

    #[test]
    fn test_do_express_checkout_sale() {
        let fields = DoExpressCheckoutPayment::sale("EC-1", "PAYER", "USD", dec!(9.9))
            .into_fields()
            .unwrap();
        assert_eq!(fields.get("PAYMENTREQUEST_0_PAYMENTACTION"), Some("Sale"));
        assert_eq!(fields.get("PAYMENTREQUEST_0_AMT"), Some("9.90"));
        assert_eq!(fields.get("PAYERID"), Some("PAYER"));
    }

    #[test]
    fn test_do_capture_complete_type() {
        let op = DoCapture {
            amount: dec!(1),
            authorization_id: "AUTH".to_owned(),
            complete: false,
            invoice_id: "INV-1".to_owned(),
        };
        let fields = op.into_fields().unwrap();
        assert_eq!(fields.get("COMPLETETYPE"), Some("NotComplete"));
        assert_eq!(fields.get("INVNUM"), Some("INV-1"));
    }

    #[test]
    fn test_do_void_limits() {
        let op = DoVoid::new("A".repeat(MAX_AUTHORIZATION_ID_LEN + 1));
        assert!(matches!(op.into_fields(), Err(GatewayError::InvalidInput(_))));

        let op = DoVoid { note: "n".repeat(MAX_NOTE_LEN + 1), ..DoVoid::new("AUTH") };
        let err = op.into_fields().unwrap_err();
        assert!(err.to_string().contains("note"));

        let op = DoVoid { message_id: "m".repeat(MAX_MESSAGE_ID_LEN + 1), ..DoVoid::new("AUTH") };
        let err = op.into_fields().unwrap_err();
        assert!(err.to_string().contains("message id"));
    }

    #[test]
    fn test_do_void_at_limits() {
        let op = DoVoid {
            authorization_id: "A".repeat(MAX_AUTHORIZATION_ID_LEN),
            note: "n".repeat(MAX_NOTE_LEN),
            message_id: String::new(),
        };
        let fields = op.into_fields().unwrap();
        assert_eq!(fields.get("METHOD"), Some("DoVoid"));
        assert!(fields.contains_key("NOTE"));
        assert!(!fields.contains_key("MSGSUBID"));
    }

    #[test]
    fn test_full_refund() {
        let fields = RefundTransaction::full("8RX1").into_fields().unwrap();
        assert_eq!(fields.get("REFUNDTYPE"), Some("FULL"));
        assert!(!fields.contains_key("AMT"));
    }

    #[test]
    fn test_recurring_profile_params() {
        let fields = CreateRecurringPaymentsProfile::new("EC-9")
            .param("BILLINGPERIOD", "Month")
            .param("BILLINGFREQUENCY", "1")
            .into_fields()
            .unwrap();
        assert_eq!(fields.get("TOKEN"), Some("EC-9"));
        assert_eq!(fields.get("BILLINGPERIOD"), Some("Month"));
        assert_eq!(fields.get("BILLINGFREQUENCY"), Some("1"));

        let fields = UpdateRecurringPaymentsProfile::new("I-1")
            .param("AMT", "5.00")
            .into_fields()
            .unwrap();
        assert_eq!(fields.get("PROFILEID"), Some("I-1"));
        assert_eq!(fields.get("AMT"), Some("5.00"));
    }

    #[test]
    fn test_manage_profile_status() {
        let op = ManageRecurringPaymentsProfileStatus {
            profile_id: "I-1".to_owned(),
            action: ProfileAction::Suspend,
        };
        let fields = op.into_fields().unwrap();
        assert_eq!(fields.get("ACTION"), Some("Suspend"));
    }

    #[test]
    fn test_transaction_search_start_date() {
        let op = ProfileTransactionSearch {
            profile_id: "I-1".to_owned(),
            start_date: Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
        };
        let fields = op.into_fields().unwrap();
        assert_eq!(fields.get("METHOD"), Some("TransactionSearch"));
        assert_eq!(fields.get("STARTDATE"), Some("2024-03-01T08:30:00Z"));
    }
}
