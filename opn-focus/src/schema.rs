//! The schema registry: which child belongs under which field name.
//!
//! Each record kind declares a closed set of named fields, each bound to a
//! child kind and a cardinality. The mapping is a pure lookup function so the
//! one pattern-based family (numbered `opt` slots on interface containers)
//! can be evaluated lazily: the number of optional interfaces is defined only
//! by the input, never pre-enumerated here.

use crate::value::ScalarKind;

/// The closed set of record node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Document root; its only field is the `opnsense` config element.
    Document,
    Config,
    System,
    Interfaces,
    Interface,
    Vlans,
    Vlan,
    Bridges,
    Bridged,
    Gateways,
    GatewayItem,
    StaticRoutes,
    Route,
    Aliases,
    Alias,
    Nat,
    NatOutbound,
    NatOutboundRule,
    NatRule,
    Filter,
    FilterRule,
    RuleLocation,
    Change,
    Range,
    SysCtl,
    SysCtlItem,
    StaticMap,
    Dhcpd,
    DhcpdItem,
    DnsMasq,
    DnsMasqHost,
    DnsMasqHostAliases,
    DnsMasqHostAliasItem,
    DnsMasqDomainOverride,
    OpenVpn,
    OpenVpnServer,
    OpenVpnClient,
    OpenVpnCsc,
    Syslog,
}

/// The kind bound to a field: a scalar leaf or a nested record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    Scalar(ScalarKind),
    Record(RecordKind),
}

/// A field declaration: bound child kind plus cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    pub kind: ChildKind,
    /// Repeated fields append in input order; single fields overwrite.
    pub repeated: bool,
}

fn one(kind: ChildKind) -> Option<FieldDecl> {
    Some(FieldDecl {
        kind,
        repeated: false,
    })
}

fn many(kind: ChildKind) -> Option<FieldDecl> {
    Some(FieldDecl {
        kind,
        repeated: true,
    })
}

/// True for the numbered optional-interface slots: `opt1`, `opt2`, ...
///
/// The suffix must be all digits; names like `optx` are unrecognized.
pub fn is_numbered_opt(name: &str) -> bool {
    name.strip_prefix("opt")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

impl RecordKind {
    /// Resolve a field name to its declaration.
    ///
    /// Returns `None` for unrecognized names; the build driver skips those
    /// elements, which keeps the model forward-compatible with config
    /// sections it does not know about.
    pub fn field(self, name: &str) -> Option<FieldDecl> {
        use ChildKind::{Record, Scalar};
        use ScalarKind::{Flag, Integer, InterfaceList, Port, RuleTarget, Text, Timestamp};

        match self {
            Self::Document => match name {
                "opnsense" => one(Record(Self::Config)),
                _ => None,
            },
            Self::Config => match name {
                "system" => one(Record(Self::System)),
                "interfaces" => one(Record(Self::Interfaces)),
                "vlans" => one(Record(Self::Vlans)),
                "bridges" => one(Record(Self::Bridges)),
                "gateways" => one(Record(Self::Gateways)),
                "staticroutes" => one(Record(Self::StaticRoutes)),
                "aliases" => one(Record(Self::Aliases)),
                "nat" => one(Record(Self::Nat)),
                "filter" => one(Record(Self::Filter)),
                "dnsmasq" => one(Record(Self::DnsMasq)),
                "dhcpd" => one(Record(Self::Dhcpd)),
                "openvpn" => one(Record(Self::OpenVpn)),
                "syslog" => one(Record(Self::Syslog)),
                "sysctl" => one(Record(Self::SysCtl)),
                _ => None,
            },
            Self::System => match name {
                "optimization" | "hostname" | "domain" | "timeservers" | "timezone"
                | "language" => one(Scalar(Text)),
                "dnsserver" => many(Scalar(Text)),
                _ => None,
            },
            Self::Interfaces => match name {
                "wan" | "lan" | "opt" => one(Record(Self::Interface)),
                _ if is_numbered_opt(name) => one(Record(Self::Interface)),
                _ => None,
            },
            Self::Interface => match name {
                "if" | "descr" | "ipaddr" | "subnet" => one(Scalar(Text)),
                "enable" => one(Scalar(Flag)),
                _ => None,
            },
            Self::Vlans => match name {
                "vlan" => many(Record(Self::Vlan)),
                _ => None,
            },
            Self::Vlan => match name {
                "vlanif" | "if" | "descr" => one(Scalar(Text)),
                "tag" => one(Scalar(Integer)),
                _ => None,
            },
            Self::Bridges => match name {
                "bridged" => many(Record(Self::Bridged)),
                _ => None,
            },
            Self::Bridged => match name {
                "bridgeif" | "descr" => one(Scalar(Text)),
                "members" => one(Scalar(InterfaceList)),
                _ => None,
            },
            Self::Gateways => match name {
                "gateway_item" => many(Record(Self::GatewayItem)),
                _ => None,
            },
            Self::GatewayItem => match name {
                "interface" => one(Scalar(InterfaceList)),
                "gateway" | "name" | "ipprotocol" | "descr" => one(Scalar(Text)),
                "weight" | "interval" | "alert_interval" => one(Scalar(Integer)),
                "defaultgw" => one(Scalar(Flag)),
                _ => None,
            },
            Self::StaticRoutes => match name {
                "route" => many(Record(Self::Route)),
                _ => None,
            },
            Self::Route => match name {
                "network" | "gateway" | "descr" => one(Scalar(Text)),
                _ => None,
            },
            Self::Aliases => match name {
                "alias" => many(Record(Self::Alias)),
                _ => None,
            },
            Self::Alias => match name {
                "name" | "type" | "address" | "descr" | "detail" => one(Scalar(Text)),
                _ => None,
            },
            Self::Nat => match name {
                "outbound" => one(Record(Self::NatOutbound)),
                "rule" => many(Record(Self::NatRule)),
                _ => None,
            },
            Self::NatOutbound => match name {
                "mode" => one(Scalar(Text)),
                "rule" => many(Record(Self::NatOutboundRule)),
                _ => None,
            },
            Self::NatOutboundRule => match name {
                "interface" => one(Scalar(InterfaceList)),
                "source" | "destination" => one(Record(Self::RuleLocation)),
                "dstport" | "natport" | "staticnatport" => one(Scalar(Port)),
                "target" | "targetip" | "targetip_subnet" | "descr" => one(Scalar(Text)),
                "created" | "updated" => one(Record(Self::Change)),
                "disabled" => one(Scalar(Flag)),
                _ => None,
            },
            Self::NatRule => match name {
                "source" | "destination" => one(Record(Self::RuleLocation)),
                "protocol" | "descr" | "associated_rule_id" => one(Scalar(Text)),
                "target" => one(Scalar(RuleTarget)),
                "local_port" => one(Scalar(Port)),
                "interface" => one(Scalar(InterfaceList)),
                "created" | "updated" => one(Record(Self::Change)),
                "disabled" => one(Scalar(Flag)),
                _ => None,
            },
            Self::Filter => match name {
                "rule" => many(Record(Self::FilterRule)),
                _ => None,
            },
            Self::FilterRule => match name {
                "id" | "tracker" | "type" | "ipprotocol" | "tag" | "tagged" | "max"
                | "max_src_nodes" | "max_src_conn" | "max_src_states" | "statetimeout"
                | "statetype" | "os" | "protocol" | "descr" | "associated_rule_id" => {
                    one(Scalar(Text))
                }
                "interface" => one(Scalar(InterfaceList)),
                "source" | "destination" => one(Record(Self::RuleLocation)),
                "created" | "updated" => one(Record(Self::Change)),
                "disabled" => one(Scalar(Flag)),
                _ => None,
            },
            Self::RuleLocation => match name {
                "any" | "not" => one(Scalar(Flag)),
                "network" | "address" => one(Scalar(RuleTarget)),
                "port" => one(Scalar(Port)),
                _ => None,
            },
            Self::Change => match name {
                "time" => one(Scalar(Timestamp)),
                "username" => one(Scalar(Text)),
                _ => None,
            },
            Self::Range => match name {
                "from" | "to" => one(Scalar(Text)),
                _ => None,
            },
            Self::SysCtl => match name {
                "item" => many(Record(Self::SysCtlItem)),
                _ => None,
            },
            Self::SysCtlItem => match name {
                "tunable" | "value" | "descr" => one(Scalar(Text)),
                _ => None,
            },
            Self::StaticMap => match name {
                "mac" | "ipaddr" | "hostname" => one(Scalar(Text)),
                _ => None,
            },
            Self::Dhcpd => match name {
                "wan" | "lan" | "opt" => one(Record(Self::DhcpdItem)),
                _ if is_numbered_opt(name) => one(Record(Self::DhcpdItem)),
                _ => None,
            },
            Self::DhcpdItem => match name {
                "range" => many(Record(Self::Range)),
                "staticmap" => many(Record(Self::StaticMap)),
                "defaultleasetime" | "maxleasetime" => one(Scalar(Integer)),
                "enable" => one(Scalar(Flag)),
                _ => None,
            },
            Self::DnsMasq => match name {
                "enable" | "reqdhcp" | "reqdhcpstatic" | "strict_order" => one(Scalar(Flag)),
                "custom_options" => one(Scalar(Text)),
                "interface" => one(Scalar(InterfaceList)),
                "hosts" => many(Record(Self::DnsMasqHost)),
                "domainoverrides" => many(Record(Self::DnsMasqDomainOverride)),
                _ => None,
            },
            Self::DnsMasqHost => match name {
                "host" | "domain" | "ip" | "descr" => one(Scalar(Text)),
                "aliases" => one(Record(Self::DnsMasqHostAliases)),
                _ => None,
            },
            Self::DnsMasqHostAliases => match name {
                "item" => many(Record(Self::DnsMasqHostAliasItem)),
                _ => None,
            },
            Self::DnsMasqHostAliasItem => match name {
                "host" | "domain" | "description" => one(Scalar(Text)),
                _ => None,
            },
            Self::DnsMasqDomainOverride => match name {
                "domain" | "ip" | "descr" => one(Scalar(Text)),
                "idx" => one(Scalar(Integer)),
                _ => None,
            },
            Self::OpenVpn => match name {
                "openvpn_server" => many(Record(Self::OpenVpnServer)),
                "openvpn_client" => many(Record(Self::OpenVpnClient)),
                "openvpn_csc" => many(Record(Self::OpenVpnCsc)),
                _ => None,
            },
            Self::OpenVpnServer => match name {
                "vpnid" | "local_port" => one(Scalar(Integer)),
                "interface" => one(Scalar(InterfaceList)),
                "mode" | "authmode" | "protocol" | "dev_mode" | "ipaddr" | "crypto"
                | "digest" | "tunnel_network" | "remote_network" | "local_network"
                | "dynamic_ip" | "pool_enable" | "topology" | "description"
                | "custom_options" => one(Scalar(Text)),
                _ => None,
            },
            Self::OpenVpnClient => match name {
                "vpnid" | "local_port" | "server_port" => one(Scalar(Integer)),
                "interface" => one(Scalar(InterfaceList)),
                "auth_user" | "mode" | "protocol" | "dev_mode" | "ipaddr" | "server_addr"
                | "crypto" | "digest" | "tunnel_network" | "remote_network"
                | "local_network" | "topology" | "description" | "custom_options" => {
                    one(Scalar(Text))
                }
                _ => None,
            },
            Self::OpenVpnCsc => match name {
                "server_list" | "common_name" | "description" | "tunnel_network" => {
                    one(Scalar(Text))
                }
                _ => None,
            },
            Self::Syslog => match name {
                "nentries" | "logfilesize" => one(Scalar(Integer)),
                "remoteserver" | "remoteserver2" | "remoteserver3" | "ipproto" => {
                    one(Scalar(Text))
                }
                "sourceip" => one(Scalar(InterfaceList)),
                "logall" | "enable" => one(Scalar(Flag)),
                _ => None,
            },
        }
    }
}
