//! Private gateway resource handler

use async_trait::async_trait;
use nimbus_api::{entity_gone, CloudApi, CreatePrivateGatewayParams};
use nimbus_common::error::ResultExt;
use nimbus_common::{FieldType, Result};
use tracing::debug;

use super::Resource;
use crate::data::ResourceData;
use crate::resolver::{self, IdKind};
use crate::schema::{self, FieldSchema};

static SCHEMA: &[FieldSchema] = &[
    FieldSchema::required("gateway", FieldType::String).force_new(),
    FieldSchema::required("ip_address", FieldType::String).force_new(),
    FieldSchema::required("netmask", FieldType::String).force_new(),
    FieldSchema::required("vlan", FieldType::String).force_new(),
    FieldSchema::optional("physical_network_id", FieldType::String).force_new(),
    FieldSchema::optional("network_offering", FieldType::String).force_new(),
    FieldSchema::required("acl_id", FieldType::String),
    FieldSchema::required("vpc_id", FieldType::String).force_new(),
    FieldSchema::optional("bypass_vlan_check", FieldType::Bool),
];

pub struct PrivateGatewayResource;

#[async_trait]
impl Resource for PrivateGatewayResource {
    fn type_name() -> &'static str {
        "nimbus_private_gateway"
    }

    fn schema() -> &'static [FieldSchema] {
        SCHEMA
    }

    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let ip_address = d.get_str("ip_address").to_string();

        let mut params = CreatePrivateGatewayParams {
            gateway: d.get_str("gateway").to_string(),
            ip_address: ip_address.clone(),
            netmask: d.get_str("netmask").to_string(),
            vpc_id: d.get_str("vpc_id").to_string(),
            vlan: d.get_str("vlan").to_string(),
            bypass_vlan_overlap_check: d.get_bool("bypass_vlan_check"),
            ..Default::default()
        };

        if let Some(physical_network_id) = d.get_str_ok("physical_network_id") {
            params.physical_network_id = Some(physical_network_id.to_string());
        }
        if let Some(offering) = d.get_str_ok("network_offering") {
            let offering_id = resolver::resolve_id(api, IdKind::NetworkOffering, offering).await?;
            params.network_offering_id = Some(offering_id);
        }
        if let Some(acl_id) = d.get_str_ok("acl_id") {
            params.acl_id = Some(acl_id.to_string());
        }

        let gateway = api
            .private_gateways
            .create(&params)
            .await
            .ctx_with(|| format!("creating private gateway for {ip_address}"))?;

        d.set_id(&gateway.id);

        Self::read(api, d).await
    }

    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        let Some(gateway) = api.private_gateways.find(&id).await? else {
            debug!(%id, "private gateway no longer exists");
            d.clear_id();
            return Ok(());
        };

        d.set("gateway", gateway.gateway.as_str());
        d.set("ip_address", gateway.ip_address.as_str());
        d.set("netmask", gateway.netmask.as_str());
        // The platform reports the VLAN as a URI.
        d.set("vlan", gateway.vlan.replace("vlan://", ""));
        d.set("acl_id", gateway.acl_id.as_str());
        d.set("vpc_id", gateway.vpc_id.as_str());

        Ok(())
    }

    async fn update(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let id = d.require_id()?.to_string();

        if d.has_change("acl_id") {
            api.acls
                .replace(d.get_str("acl_id"), &id)
                .await
                .ctx_with(|| format!("replacing the ACL of private gateway {id}"))?;
        }

        Self::read(api, d).await
    }

    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        if let Err(err) = api.private_gateways.delete(&id).await {
            // Deleting a gateway that is already gone is a no-op.
            if entity_gone(&err, &id) {
                return Ok(());
            }
            return Err(err.ctx(format!("deleting private gateway {id}")));
        }

        Ok(())
    }
}
