//! VPN customer gateway resource handler

use async_trait::async_trait;
use nimbus_api::{
    entity_gone, CloudApi, CreateVpnCustomerGatewayParams, UpdateVpnCustomerGatewayParams,
};
use nimbus_common::error::ResultExt;
use nimbus_common::{FieldType, Result};
use tracing::debug;

use super::Resource;
use crate::data::ResourceData;
use crate::resolver;
use crate::schema::{self, FieldSchema};

static SCHEMA: &[FieldSchema] = &[
    FieldSchema::required("name", FieldType::String),
    FieldSchema::required("cidr", FieldType::String),
    FieldSchema::required("esp_policy", FieldType::String),
    FieldSchema::required("gateway", FieldType::String),
    FieldSchema::required("ike_policy", FieldType::String),
    FieldSchema::required("ipsec_psk", FieldType::String),
    FieldSchema::computed("dpd", FieldType::Bool),
    FieldSchema::computed("esp_lifetime", FieldType::Int),
    FieldSchema::computed("ike_lifetime", FieldType::Int),
    FieldSchema::computed("project", FieldType::String).force_new(),
];

pub struct VpnCustomerGatewayResource;

#[async_trait]
impl Resource for VpnCustomerGatewayResource {
    fn type_name() -> &'static str {
        "nimbus_vpn_customer_gateway"
    }

    fn schema() -> &'static [FieldSchema] {
        SCHEMA
    }

    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let name = d.get_str("name").to_string();

        let mut params = CreateVpnCustomerGatewayParams {
            cidr_list: d.get_str("cidr").to_string(),
            esp_policy: d.get_str("esp_policy").to_string(),
            gateway: d.get_str("gateway").to_string(),
            ike_policy: d.get_str("ike_policy").to_string(),
            ipsec_psk: d.get_str("ipsec_psk").to_string(),
            name: Some(name.clone()),
            ..Default::default()
        };

        if let Some(dpd) = d.get_ok("dpd").and_then(nimbus_common::Value::as_bool) {
            params.dpd = Some(dpd);
        }
        if let Some(esp_lifetime) = d.get_int_ok("esp_lifetime") {
            params.esp_lifetime = Some(esp_lifetime);
        }
        if let Some(ike_lifetime) = d.get_int_ok("ike_lifetime") {
            params.ike_lifetime = Some(ike_lifetime);
        }
        params.project_id = resolver::project_id_of(api, d).await?;

        let gateway = api
            .vpn
            .create(&params)
            .await
            .ctx_with(|| format!("creating VPN customer gateway {name}"))?;

        d.set_id(&gateway.id);

        Self::read(api, d).await
    }

    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        let Some(gateway) = api.vpn.find(&id).await? else {
            debug!(name = d.get_str("name"), "VPN customer gateway no longer exists");
            d.clear_id();
            return Ok(());
        };

        d.set("name", gateway.name.as_str());
        d.set("cidr", gateway.cidr_list.as_str());
        d.set("esp_policy", gateway.esp_policy.as_str());
        d.set("gateway", gateway.gateway.as_str());
        d.set("ike_policy", gateway.ike_policy.as_str());
        d.set("ipsec_psk", gateway.ipsec_psk.as_str());
        d.set("dpd", gateway.dpd);
        d.set("esp_lifetime", gateway.esp_lifetime);
        d.set("ike_lifetime", gateway.ike_lifetime);

        resolver::set_value_or_id(d, "project", &gateway.project, &gateway.project_id);

        Ok(())
    }

    async fn update(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let id = d.require_id()?.to_string();
        let name = d.get_str("name").to_string();

        // The update call re-sends the full required tuple.
        let mut params = UpdateVpnCustomerGatewayParams {
            id,
            cidr_list: d.get_str("cidr").to_string(),
            esp_policy: d.get_str("esp_policy").to_string(),
            gateway: d.get_str("gateway").to_string(),
            ike_policy: d.get_str("ike_policy").to_string(),
            ipsec_psk: d.get_str("ipsec_psk").to_string(),
            name: Some(name.clone()),
            ..Default::default()
        };

        if let Some(dpd) = d.get_ok("dpd").and_then(nimbus_common::Value::as_bool) {
            params.dpd = Some(dpd);
        }
        if let Some(esp_lifetime) = d.get_int_ok("esp_lifetime") {
            params.esp_lifetime = Some(esp_lifetime);
        }
        if let Some(ike_lifetime) = d.get_int_ok("ike_lifetime") {
            params.ike_lifetime = Some(ike_lifetime);
        }

        api.vpn
            .update(&params)
            .await
            .ctx_with(|| format!("updating VPN customer gateway {name}"))?;

        Self::read(api, d).await
    }

    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        if let Err(err) = api.vpn.delete(&id).await {
            // Deleting a gateway that is already gone is a no-op.
            if entity_gone(&err, &id) {
                return Ok(());
            }
            return Err(err.ctx(format!(
                "deleting VPN customer gateway {}",
                d.get_str("name")
            )));
        }

        Ok(())
    }
}
