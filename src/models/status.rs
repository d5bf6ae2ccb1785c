use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// 附加标签：存在拒收
pub const HAS_REJECTIONS: &str = "Has Rejections";

/// 状态枚举：每个变体对应一个固定的展示标签
pub trait StatusLabel: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;
}

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl StatusLabel for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

status_enum!(
    /// 采购订单开票状态
    PoInvoiceStatus {
        Open => "Open",
        PartiallyInvoiced => "Partially Invoiced",
        FullyInvoiced => "Fully Invoiced",
        OverInvoiced => "Over Invoiced",
    }
);

status_enum!(
    /// 采购订单收货状态
    ReceiptStatus {
        NoGrnYet => "No GRN Yet",
        PartiallyReceived => "Partially Received",
        FullyReceived => "Fully Received",
        OverReceived => "Over Received",
    }
);

status_enum!(
    /// 发票关联采购订单状态
    InvoicePoStatus {
        NoPo => "No PO",
        PoLinked => "PO Linked",
    }
);

status_enum!(
    /// 发票对比收货状态
    InvoiceGrnStatus {
        MissingGrn => "Missing GRN",
        GrnUnder => "GRN Under",
        GrnMatched => "GRN Matched",
        GrnOver => "GRN Over",
    }
);

status_enum!(
    /// 收货单对比发票状态
    GrnInvoiceStatus {
        MissingInvoice => "Missing Invoice",
        UnderVsInvoice => "Under vs Invoice",
        MatchedVsInvoice => "Matched vs Invoice",
        OverVsInvoice => "Over vs Invoice",
    }
);

status_enum!(
    /// 收货单验收状态
    AcceptanceStatus {
        FullyAccepted => "Fully Accepted",
        PartiallyAccepted => "Partially Accepted",
    }
);

/// 有序标签集合：主状态在前，"Has Rejections" 可选追加在后
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTags<S> {
    pub primary: S,
    pub has_rejections: bool,
}

impl<S: StatusLabel> StatusTags<S> {
    pub fn new(primary: S, has_rejections: bool) -> Self {
        Self {
            primary,
            has_rejections,
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.primary.label())
            .chain(self.has_rejections.then_some(HAS_REJECTIONS))
    }

    /// 该集合可能出现的全部标签
    pub fn vocabulary() -> Vec<&'static str> {
        S::ALL
            .iter()
            .map(|s| s.label())
            .chain(std::iter::once(HAS_REJECTIONS))
            .collect()
    }
}

impl<S: StatusLabel> Serialize for StatusTags<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let len = if self.has_rejections { 2 } else { 1 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        for label in self.labels() {
            seq.serialize_element(label)?;
        }
        seq.end()
    }
}

/// 单值状态的全部标签
pub fn labels_of<S: StatusLabel>() -> Vec<&'static str> {
    S::ALL.iter().map(|s| s.label()).collect()
}
