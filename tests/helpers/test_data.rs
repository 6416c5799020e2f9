// Test Data
//
// Configuration pointing at the test server, and NVP response bodies shaped
// like the ones the PayPal sandbox returns.

use paypal_digital_goods::{Config, Credentials};

pub const TEST_USERNAME: &str = "seller_1305013375_biz_api1.example.com";
pub const TEST_PASSWORD: &str = "1305013383";
pub const TEST_SIGNATURE: &str = "AvkQtZ-1cRY2pS5rd5Y0UvyCf3hvAk3q4kQNBgBs0jlClhm0fH3tVx8N";

pub const TOKEN: &str = "EC-0TD95475M3219592N";
pub const PAYER_ID: &str = "J9GQ3ACVMNQ6E";
pub const TRANSACTION_ID: &str = "6GA2846573851864T";
pub const PROFILE_ID: &str = "I-537HXDRJCH67";

pub const SET_EXPRESS_CHECKOUT_SUCCESS: &str = "TOKEN=EC%2d0TD95475M3219592N\
    &TIMESTAMP=2011%2d11%2d22T06%3a52%3a30Z&CORRELATIONID=3b3bc1cd4ec0f&ACK=Success\
    &VERSION=76%2e0&BUILD=2230381";

pub const CHECKOUT_DETAILS_PURCHASE: &str = "TOKEN=EC%2d0TD95475M3219592N\
    &CHECKOUTSTATUS=PaymentActionNotInitiated&TIMESTAMP=2011%2d11%2d22T06%3a53%3a01Z\
    &CORRELATIONID=a64ad6f1e0ea4&ACK=Success&VERSION=76%2e0&BUILD=2230381\
    &EMAIL=buyer%40example%2ecom&PAYERID=J9GQ3ACVMNQ6E&PAYERSTATUS=verified\
    &FIRSTNAME=Test&LASTNAME=User&COUNTRYCODE=US&CURRENCYCODE=USD&AMT=12%2e00\
    &PAYMENTREQUEST_0_CURRENCYCODE=USD&PAYMENTREQUEST_0_AMT=12%2e00";

pub const CHECKOUT_DETAILS_SUBSCRIPTION: &str = "TOKEN=EC%2d0TD95475M3219592N\
    &BILLINGAGREEMENTACCEPTEDSTATUS=1&CHECKOUTSTATUS=PaymentActionNotInitiated\
    &TIMESTAMP=2011%2d11%2d22T06%3a53%3a01Z&CORRELATIONID=a64ad6f1e0ea4&ACK=Success\
    &VERSION=76%2e0&BUILD=2230381&EMAIL=buyer%40example%2ecom&PAYERID=J9GQ3ACVMNQ6E\
    &PAYERSTATUS=verified&FIRSTNAME=Test&LASTNAME=User&COUNTRYCODE=US";

pub const DO_EXPRESS_CHECKOUT_PAYMENT_SUCCESS: &str = "TOKEN=EC%2d0TD95475M3219592N\
    &SUCCESSPAGEREDIRECTREQUESTED=false&TIMESTAMP=2011%2d11%2d22T06%3a54%3a22Z\
    &CORRELATIONID=b8c8d3e2a1f19&ACK=Success&VERSION=76%2e0&BUILD=2230381\
    &INSURANCEOPTIONSELECTED=false&SHIPPINGOPTIONISDEFAULT=false\
    &PAYMENTINFO_0_TRANSACTIONID=6GA2846573851864T&PAYMENTINFO_0_TRANSACTIONTYPE=cart\
    &PAYMENTINFO_0_PAYMENTTYPE=instant&PAYMENTINFO_0_ORDERTIME=2011%2d11%2d22T06%3a54%3a21Z\
    &PAYMENTINFO_0_AMT=12%2e00&PAYMENTINFO_0_FEEAMT=0%2e65&PAYMENTINFO_0_TAXAMT=0%2e00\
    &PAYMENTINFO_0_CURRENCYCODE=USD&PAYMENTINFO_0_PAYMENTSTATUS=Completed\
    &PAYMENTINFO_0_PENDINGREASON=None&PAYMENTINFO_0_REASONCODE=None\
    &PAYMENTINFO_0_ERRORCODE=0&PAYMENTINFO_0_ACK=Success";

pub const TRANSACTION_DETAILS_SUCCESS: &str = "RECEIVEREMAIL=seller%40example%2ecom\
    &RECEIVERID=7VLNX7QCTSJRS&EMAIL=buyer%40example%2ecom&PAYERID=J9GQ3ACVMNQ6E\
    &PAYERSTATUS=verified&COUNTRYCODE=US&SUBJECT=Example%20Digital%20Good%20Purchase\
    &TIMESTAMP=2011%2d11%2d22T06%3a55%3a10Z&CORRELATIONID=d1fa6e1c43e3c&ACK=Success\
    &VERSION=76%2e0&BUILD=2230381&FIRSTNAME=Test&LASTNAME=User\
    &TRANSACTIONID=6GA2846573851864T&TRANSACTIONTYPE=cart&PAYMENTTYPE=instant\
    &ORDERTIME=2011%2d11%2d22T06%3a54%3a21Z&AMT=12%2e00&FEEAMT=0%2e65&TAXAMT=0%2e00\
    &CURRENCYCODE=USD&PAYMENTSTATUS=Completed&PENDINGREASON=None&REASONCODE=None\
    &L_NAME0=Digital%20Good%20Example&L_QTY0=1&L_TAXAMT0=0%2e00&L_AMT0=12%2e00\
    &L_CURRENCYCODE0=USD";

pub const CREATE_PROFILE_SUCCESS: &str = "PROFILEID=I%2d537HXDRJCH67\
    &PROFILESTATUS=ActiveProfile&TIMESTAMP=2011%2d11%2d22T06%3a54%3a19Z\
    &CORRELATIONID=beba80198304d&ACK=Success&VERSION=76%2e0&BUILD=2230381";

pub const PROFILE_DETAILS_SUCCESS: &str = "PROFILEID=I%2d537HXDRJCH67&STATUS=Active\
    &AUTOBILLOUTAMT=AddToNextBilling&DESC=Digital%20Goods%20Subscription\
    &MAXFAILEDPAYMENTS=0&SUBSCRIBERNAME=Test%20User\
    &PROFILESTARTDATE=2011%2d11%2d23T08%3a00%3a00Z&NEXTBILLINGDATE=2011%2d11%2d23T10%3a00%3a00Z\
    &NUMCYCLESCOMPLETED=0&NUMCYCLESREMAINING=4&OUTSTANDINGBALANCE=0%2e00\
    &FAILEDPAYMENTCOUNT=0&LASTPAYMENTDATE=2011%2d11%2d22T06%3a54%3a22Z\
    &LASTPAYMENTAMT=10%2e00&TRIALAMTPAID=0%2e00&REGULARAMTPAID=0%2e00\
    &AGGREGATEAMT=0%2e00&AGGREGATEOPTIONALAMT=10%2e00\
    &FINALPAYMENTDUEDATE=2011%2d12%2d14T10%3a00%3a00Z&TIMESTAMP=2011%2d11%2d22T06%3a54%3a29Z\
    &CORRELATIONID=c0e3666366c96&ACK=Success&VERSION=76%2e0&BUILD=2230381\
    &BILLINGPERIOD=Week&BILLINGFREQUENCY=1&TOTALBILLINGCYCLES=4&CURRENCYCODE=USD\
    &AMT=2%2e00&SHIPPINGAMT=0%2e00&TAXAMT=0%2e00";

pub const MANAGE_PROFILE_SUCCESS: &str = "PROFILEID=I%2d537HXDRJCH67\
    &TIMESTAMP=2011%2d11%2d22T07%3a10%3a02Z&CORRELATIONID=6a2b8c1d9e3f0&ACK=Success\
    &VERSION=76%2e0&BUILD=2230381";

pub const SECURITY_HEADER_FAILURE: &str = "TIMESTAMP=2011%2d11%2d22T06%3a52%3a30Z\
    &CORRELATIONID=8a3ff1a2b3c4d&ACK=Failure&VERSION=76%2e0&BUILD=2230381\
    &L_ERRORCODE0=10002&L_SHORTMESSAGE0=Security%20error\
    &L_LONGMESSAGE0=Security%20header%20is%20not%20valid&L_SEVERITYCODE0=Error";

pub const INVALID_TOKEN_FAILURE: &str = "TIMESTAMP=2011%2d11%2d22T06%3a54%3a22Z\
    &CORRELATIONID=f3e2d1c0b9a88&ACK=Failure&VERSION=76%2e0&BUILD=2230381\
    &L_ERRORCODE0=10410&L_SHORTMESSAGE0=Invalid%20token\
    &L_LONGMESSAGE0=Invalid%20token%2e&L_SEVERITYCODE0=Error\
    &L_ERRORCODE1=10411&L_SHORTMESSAGE1=This%20Express%20Checkout%20session%20has%20expired%2e\
    &L_LONGMESSAGE1=This%20Express%20Checkout%20session%20has%20expired%2e&L_SEVERITYCODE1=Error";

pub const SUCCESS_WITH_WARNING: &str = "TOKEN=EC%2d0TD95475M3219592N\
    &TIMESTAMP=2011%2d11%2d22T06%3a52%3a30Z&CORRELATIONID=7c6b5a4d3e2f1\
    &ACK=SuccessWithWarning&VERSION=76%2e0&BUILD=2230381\
    &L_ERRORCODE0=11452&L_SHORTMESSAGE0=Merchant%20not%20enabled\
    &L_LONGMESSAGE0=Merchant%20not%20enabled%20for%20reference%20transactions&L_SEVERITYCODE0=Warning";

/// Sandbox configuration that sends every call to `endpoint`
pub fn test_config(endpoint: &str) -> Config {
    Config::new(Credentials::new(TEST_USERNAME, TEST_PASSWORD, TEST_SIGNATURE).unwrap())
        .with_return_url("https://shop.example.com/return.php?paypal=paid")
        .unwrap()
        .with_cancel_url("https://shop.example.com/return.php?paypal=cancel")
        .unwrap()
        .with_business_name("Demo Store")
        .unwrap()
        .with_endpoint(endpoint)
        .unwrap()
}
