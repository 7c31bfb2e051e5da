//! Network resource handler

use async_trait::async_trait;
use nimbus_api::{
    entity_gone, AssociateIpParams, CloudApi, CreateNetworkParams, UpdateNetworkParams,
};
use nimbus_common::error::ResultExt;
use nimbus_common::{Error, FieldType, Result};
use tracing::{debug, info};

use super::Resource;
use crate::cidr;
use crate::data::ResourceData;
use crate::resolver::{self, IdKind};
use crate::schema::{self, FieldSchema};
use crate::tags;

/// Remote tag type for networks.
const TAG_TYPE: &str = "Network";

/// Sentinel for "no ACL associated".
const NONE: &str = "none";

static SCHEMA: &[FieldSchema] = &[
    FieldSchema::required("name", FieldType::String),
    FieldSchema::computed("display_text", FieldType::String),
    FieldSchema::required("cidr", FieldType::String).force_new(),
    FieldSchema::computed("gateway", FieldType::String).force_new(),
    FieldSchema::computed("startip", FieldType::String).force_new(),
    FieldSchema::computed("endip", FieldType::String).force_new(),
    FieldSchema::computed("network_domain", FieldType::String),
    FieldSchema::required("network_offering", FieldType::String),
    FieldSchema::optional("vlan", FieldType::Int).force_new(),
    FieldSchema::optional("vpc_id", FieldType::String).force_new(),
    FieldSchema::optional("acl_id", FieldType::String),
    FieldSchema::computed("project", FieldType::String).force_new(),
    FieldSchema::optional("source_nat_ip", FieldType::Bool).force_new(),
    FieldSchema::computed("source_nat_ip_address", FieldType::String),
    FieldSchema::computed("source_nat_ip_id", FieldType::String),
    FieldSchema::required("zone", FieldType::String).force_new(),
    FieldSchema::optional("bypass_vlan_check", FieldType::Bool),
    FieldSchema::optional("tags", FieldType::StringMap),
];

pub struct NetworkResource;

#[async_trait]
impl Resource for NetworkResource {
    fn type_name() -> &'static str {
        "nimbus_network"
    }

    fn schema() -> &'static [FieldSchema] {
        SCHEMA
    }

    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let name = d.get_str("name").to_string();

        let network_offering_id =
            resolver::resolve_id(api, IdKind::NetworkOffering, d.get_str("network_offering"))
                .await?;
        let zone_id = resolver::resolve_id(api, IdKind::Zone, d.get_str("zone")).await?;

        // The offering decides whether an explicit IP pool may be supplied.
        let offering = api
            .network_offerings
            .find(&network_offering_id)
            .await?
            .ok_or_else(|| Error::NotFound {
                kind: "network_offering",
                name: network_offering_id.clone(),
            })?;

        let range = cidr::derive_ip_range(d, offering.specify_ip_ranges)?;

        let mut params = CreateNetworkParams {
            name: name.clone(),
            network_offering_id,
            zone_id: zone_id.clone(),
            display_text: Some(
                d.get_str_ok("display_text").unwrap_or(&name).to_string(),
            ),
            gateway: Some(range.gateway),
            netmask: Some(range.netmask),
            start_ip: range.start_ip,
            end_ip: range.end_ip,
            bypass_vlan_overlap_check: d.get_bool("bypass_vlan_check"),
            ..Default::default()
        };

        if let Some(domain) = d.get_str_ok("network_domain") {
            params.network_domain = Some(domain.to_string());
        }
        if let Some(vlan) = d.get_int_ok("vlan") {
            params.vlan = Some(vlan.to_string());
        }

        if let Some(vpc_id) = d.get_str_ok("vpc_id") {
            params.vpc_id = Some(vpc_id.to_string());

            // Inside a VPC an ACL list may be associated right away.
            if let Some(acl_id) = d.get_str_ok("acl_id") {
                if acl_id != NONE {
                    params.acl_id = Some(acl_id.to_string());
                }
            }
        }

        params.project_id = resolver::project_id_of(api, d).await?;

        info!(%name, "creating network");
        let network = api
            .networks
            .create(&params)
            .await
            .ctx_with(|| format!("creating network {name}"))?;

        d.set_id(&network.id);

        tags::set_tags(api, TAG_TYPE, &network.id, d)
            .await
            .ctx_with(|| format!("setting tags on network {name}"))?;

        if d.get_bool("source_nat_ip") {
            let mut ip_params = AssociateIpParams {
                zone_id,
                network_id: Some(network.id.clone()),
                ..Default::default()
            };
            if let Some(vpc_id) = d.get_str_ok("vpc_id") {
                ip_params.vpc_id = Some(vpc_id.to_string());
            }
            ip_params.project_id = resolver::project_id_of(api, d).await?;

            let ip = api
                .addresses
                .associate(&ip_params)
                .await
                .ctx_with(|| format!("associating a new IP address with network {name}"))?;

            d.set("source_nat_ip_address", ip.ip_address.as_str());
            d.set("source_nat_ip_id", ip.id.as_str());
        }

        Self::read(api, d).await
    }

    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        let Some(network) = api.networks.find(&id, d.get_str_ok("project")).await? else {
            debug!(name = d.get_str("name"), "network no longer exists");
            d.clear_id();
            return Ok(());
        };

        d.set("name", network.name.as_str());
        d.set("display_text", network.display_text.as_str());
        d.set("cidr", network.cidr.as_str());
        d.set("gateway", network.gateway.as_str());
        d.set("network_domain", network.network_domain.as_str());
        d.set("vpc_id", network.vpc_id.as_str());

        let acl_id = if network.acl_id.is_empty() {
            NONE
        } else {
            network.acl_id.as_str()
        };
        d.set("acl_id", acl_id);

        d.set("tags", tags::to_map(&network.tags));

        resolver::set_value_or_id(
            d,
            "network_offering",
            &network.network_offering_name,
            &network.network_offering_id,
        );
        resolver::set_value_or_id(d, "project", &network.project, &network.project_id);
        resolver::set_value_or_id(d, "zone", &network.zone_name, &network.zone_id);

        if d.get_bool("source_nat_ip") {
            let ip_id = d.get_str("source_nat_ip_id").to_string();
            let associated = match api.addresses.find(&ip_id, d.get_str_ok("project")).await? {
                Some(ip) => ip.associated_network_id == network.id,
                None => false,
            };
            if !associated {
                debug!(ip_id = %ip_id, "source NAT IP is no longer associated");
                d.set("source_nat_ip", false);
                d.set("source_nat_ip_id", "");
            }
        }

        Ok(())
    }

    async fn update(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let id = d.require_id()?.to_string();
        let name = d.get_str("name").to_string();

        let mut params = UpdateNetworkParams {
            id: id.clone(),
            ..Default::default()
        };

        if d.has_change("name") || d.has_change("display_text") {
            params.name = Some(name.clone());
            let display_text = d.get_str("display_text");
            params.display_text = Some(if display_text.is_empty() {
                name.clone()
            } else {
                display_text.to_string()
            });
        }

        if d.has_change("cidr") {
            params.guest_vm_cidr = Some(d.get_str("cidr").to_string());
        }

        if d.has_change("network_domain") {
            params.network_domain = Some(d.get_str("network_domain").to_string());
        }

        if d.has_change("network_offering") {
            let offering_id = resolver::resolve_id(
                api,
                IdKind::NetworkOffering,
                d.get_str("network_offering"),
            )
            .await?;
            params.network_offering_id = Some(offering_id);
        }

        api.networks
            .update(&params)
            .await
            .ctx_with(|| format!("updating network {name}"))?;

        if d.has_change("acl_id") {
            api.acls
                .replace(d.get_str("acl_id"), &id)
                .await
                .ctx_with(|| format!("replacing the ACL of network {name}"))?;
        }

        if d.has_change("tags") {
            tags::update_tags(api, TAG_TYPE, &id, d)
                .await
                .ctx_with(|| format!("updating tags on network {name}"))?;
        }

        Self::read(api, d).await
    }

    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        info!(name = d.get_str("name"), "deleting network");
        if let Err(err) = api.networks.delete(&id).await {
            // Deleting a network that is already gone is a no-op.
            if entity_gone(&err, &id) {
                return Ok(());
            }
            return Err(err.ctx(format!("deleting network {}", d.get_str("name"))));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nimbus_api::{Network, NetworkOffering, PublicIpAddress, Zone};

    use super::*;
    use crate::fake::FakeCloud;

    fn fake_env(specify_ip_ranges: bool) -> Arc<FakeCloud> {
        let fake = Arc::new(FakeCloud::new());
        fake.zones.lock().unwrap().push(Zone {
            id: "zone-1".to_string(),
            name: "eu-west".to_string(),
            ..Default::default()
        });
        fake.network_offerings.lock().unwrap().push(NetworkOffering {
            id: "no-1".to_string(),
            name: "isolated".to_string(),
            specify_ip_ranges,
        });
        fake
    }

    fn desired_config() -> ResourceData {
        let mut d = ResourceData::new();
        d.set("name", "guest-net");
        d.set("cidr", "10.0.0.0/24");
        d.set("network_offering", "isolated");
        d.set("zone", "eu-west");
        d
    }

    #[tokio::test]
    async fn create_derives_the_ip_range_from_the_cidr() {
        let fake = fake_env(true);
        let api = fake.clone().api();

        let mut d = desired_config();
        NetworkResource::create(&api, &mut d).await.unwrap();

        let creates = fake.network_creates.lock().unwrap();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].gateway.as_deref(), Some("10.0.0.1"));
        assert_eq!(creates[0].netmask.as_deref(), Some("255.255.255.0"));
        assert_eq!(creates[0].start_ip.as_deref(), Some("10.0.0.2"));
        assert_eq!(creates[0].end_ip.as_deref(), Some("10.0.0.254"));
        assert_eq!(creates[0].display_text.as_deref(), Some("guest-net"));
    }

    #[tokio::test]
    async fn create_omits_the_pool_when_ranges_are_unsupported() {
        let fake = fake_env(false);
        let api = fake.clone().api();

        let mut d = desired_config();
        NetworkResource::create(&api, &mut d).await.unwrap();

        let creates = fake.network_creates.lock().unwrap();
        assert_eq!(creates[0].start_ip, None);
        assert_eq!(creates[0].end_ip, None);
        assert_eq!(creates[0].gateway.as_deref(), Some("10.0.0.1"));
    }

    #[tokio::test]
    async fn acl_is_only_sent_inside_a_vpc() {
        let fake = fake_env(true);
        let api = fake.clone().api();

        let mut d = desired_config();
        d.set("acl_id", "acl-1");
        NetworkResource::create(&api, &mut d).await.unwrap();
        assert_eq!(fake.network_creates.lock().unwrap()[0].acl_id, None);

        let mut d = desired_config();
        d.set("vpc_id", "vpc-1");
        d.set("acl_id", "acl-1");
        NetworkResource::create(&api, &mut d).await.unwrap();
        let creates = fake.network_creates.lock().unwrap();
        assert_eq!(creates[1].acl_id.as_deref(), Some("acl-1"));
        assert_eq!(creates[1].vpc_id.as_deref(), Some("vpc-1"));
    }

    #[tokio::test]
    async fn source_nat_ip_is_associated_and_recorded() {
        let fake = fake_env(true);
        let api = fake.clone().api();

        let mut d = desired_config();
        d.set("source_nat_ip", true);
        NetworkResource::create(&api, &mut d).await.unwrap();

        assert_eq!(d.get_str("source_nat_ip_address"), "203.0.113.10");
        assert!(!d.get_str("source_nat_ip_id").is_empty());

        let associates = fake.associates.lock().unwrap();
        assert_eq!(associates.len(), 1);
        assert!(associates[0].network_id.is_some());
    }

    #[tokio::test]
    async fn read_clears_the_source_nat_flag_when_the_ip_moved() {
        let fake = fake_env(true);
        fake.networks.lock().unwrap().insert(
            "net-1".to_string(),
            Network {
                id: "net-1".to_string(),
                name: "guest-net".to_string(),
                cidr: "10.0.0.0/24".to_string(),
                ..Default::default()
            },
        );
        fake.public_ips.lock().unwrap().push(PublicIpAddress {
            id: "ip-1".to_string(),
            ip_address: "203.0.113.10".to_string(),
            associated_network_id: "net-other".to_string(),
            is_source_nat: true,
            ..Default::default()
        });
        let api = fake.clone().api();

        let mut d = ResourceData::import("net-1");
        d.set("source_nat_ip", true);
        d.set("source_nat_ip_id", "ip-1");
        NetworkResource::read(&api, &mut d).await.unwrap();

        assert!(!d.get_bool("source_nat_ip"));
        assert_eq!(d.get_str("source_nat_ip_id"), "");
    }

    #[tokio::test]
    async fn read_maps_an_empty_acl_to_the_sentinel() {
        let fake = fake_env(true);
        fake.networks.lock().unwrap().insert(
            "net-1".to_string(),
            Network {
                id: "net-1".to_string(),
                name: "guest-net".to_string(),
                ..Default::default()
            },
        );
        let api = fake.clone().api();

        let mut d = ResourceData::import("net-1");
        NetworkResource::read(&api, &mut d).await.unwrap();
        assert_eq!(d.get_str("acl_id"), "none");
    }

    #[tokio::test]
    async fn acl_change_issues_a_replace_call() {
        let fake = fake_env(true);
        fake.networks.lock().unwrap().insert(
            "net-1".to_string(),
            Network {
                id: "net-1".to_string(),
                name: "guest-net".to_string(),
                ..Default::default()
            },
        );
        let api = fake.clone().api();

        let mut d = ResourceData::import("net-1");
        d.set("name", "guest-net");
        d.set("cidr", "10.0.0.0/24");
        d.set("network_offering", "isolated");
        d.set("zone", "eu-west");
        d.set_prior("acl_id", "none");
        d.set("acl_id", "acl-2");

        NetworkResource::update(&api, &mut d).await.unwrap();

        let replaces = fake.acl_replaces.lock().unwrap();
        assert_eq!(
            replaces.as_slice(),
            &[("acl-2".to_string(), "net-1".to_string())]
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent_for_a_gone_network() {
        let fake = fake_env(true);
        fake.fail(
            "deleteNetwork",
            nimbus_common::Error::Api {
                op: "deleteNetwork".to_string(),
                code: 431,
                text: "Invalid parameter id value=net-9 due to incorrect long value format, \
                       or entity does not exist"
                    .to_string(),
            },
        );
        let api = fake.clone().api();

        let mut d = ResourceData::import("net-9");
        NetworkResource::delete(&api, &mut d).await.unwrap();
    }
}
